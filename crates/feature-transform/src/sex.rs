//! Sex Encoding Step

use crate::derived::DerivedFeatures;
use crate::transform::FeatureTransform;
use crate::InferenceError;
use lookup_store::{LookupTables, PassengerRecord, Sex};

/// Fixed binary mapping: female 0, male 1
#[derive(Debug, Clone, Copy, Default)]
pub struct SexTransform;

impl SexTransform {
    /// Encoded value for a sex
    pub fn encode(sex: Sex) -> u8 {
        match sex {
            Sex::Female => 0,
            Sex::Male => 1,
        }
    }
}

impl FeatureTransform for SexTransform {
    fn name(&self) -> &'static str {
        "sex"
    }

    fn transform(
        &self,
        record: &PassengerRecord,
        _lookups: &LookupTables,
        derived: &mut DerivedFeatures,
    ) -> Result<(), InferenceError> {
        derived.sex = Self::encode(record.sex);
        Ok(())
    }
}
