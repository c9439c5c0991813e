//! Feature Encoder
//!
//! Maps derived features onto a fixed-order numeric vector. Column count and
//! order are decided once at fit time and never change afterwards.

mod schema;

pub use schema::{CategoryBlock, EncoderSchema};

use thiserror::Error;

/// Errors checking a loaded schema against the derived feature layout
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncoderError {
    #[error("Schema layout mismatch: expected {expected}, got {actual}")]
    LayoutMismatch { expected: String, actual: String },
    #[error("Schema width {declared} does not match its columns ({computed})")]
    WidthMismatch { declared: usize, computed: usize },
    /// Block values must be strictly increasing for position lookups
    #[error("Categories of {feature} are not sorted and unique")]
    UnsortedCategories { feature: String },
}
