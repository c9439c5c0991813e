//! Feature Transform Chain
//!
//! Independent per-feature transforms, each reading the raw record plus the
//! frozen lookup tables and writing its derived columns.

mod age;
mod cabin;
mod chain;
mod derived;
mod embarked;
mod family;
mod fare;
mod sex;
mod title;
mod transform;

pub use age::{AgeImputation, AgeTransform};
pub use cabin::{cabin_group, CabinTransform, MISSING_CABIN};
pub use chain::TransformChain;
pub use derived::{DerivedFeatures, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
pub use embarked::EmbarkedTransform;
pub use family::{FamilyBin, FamilySizeTransform};
pub use fare::FarePerPersonTransform;
pub use sex::SexTransform;
pub use title::TitleTransform;
pub use transform::FeatureTransform;

use lookup_store::ValidationError;
use thiserror::Error;

/// Errors surfaced to the caller while transforming a record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// Neither the group nor the global fallback has a value
    #[error("No {lookup} lookup for key {key} and no global fallback")]
    MissingLookup { lookup: &'static str, key: String },

    /// Record failed schema validation
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] ValidationError),
}
