//! Family Size Step

use crate::derived::DerivedFeatures;
use crate::transform::FeatureTransform;
use crate::InferenceError;
use lookup_store::{LookupTables, PassengerRecord};
use serde::{Deserialize, Serialize};

/// Family size bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyBin {
    /// Travelling alone (size 1)
    Alone,
    /// Size 2 to 4
    Middle,
    /// Size above 4
    Large,
}

impl FamilyBin {
    /// Bucket a family size (passenger included)
    pub fn from_size(size: u32) -> Self {
        match size {
            0..=1 => FamilyBin::Alone,
            2..=4 => FamilyBin::Middle,
            _ => FamilyBin::Large,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyBin::Alone => "alone",
            FamilyBin::Middle => "middle",
            FamilyBin::Large => "large",
        }
    }
}

/// Replaces sibling and parent counts with a family size bucket
#[derive(Debug, Clone, Copy, Default)]
pub struct FamilySizeTransform;

impl FamilySizeTransform {
    /// Family size including the passenger
    pub fn family_size(record: &PassengerRecord) -> u32 {
        record.sibsp.saturating_add(record.parch).saturating_add(1)
    }
}

impl FeatureTransform for FamilySizeTransform {
    fn name(&self) -> &'static str {
        "family_size"
    }

    fn transform(
        &self,
        record: &PassengerRecord,
        _lookups: &LookupTables,
        derived: &mut DerivedFeatures,
    ) -> Result<(), InferenceError> {
        derived.family_bin = FamilyBin::from_size(Self::family_size(record));
        Ok(())
    }
}
