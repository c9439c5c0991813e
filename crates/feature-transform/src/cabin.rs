//! Cabin Deck Step

use crate::derived::DerivedFeatures;
use crate::transform::FeatureTransform;
use crate::InferenceError;
use lookup_store::{LookupTables, PassengerRecord};

/// Sentinel group for passengers without a cabin
pub const MISSING_CABIN: &str = "M";

/// Deck group for a cabin code
pub fn cabin_group(cabin: Option<&str>) -> String {
    let Some(deck) = cabin.and_then(|c| c.chars().next()) else {
        return MISSING_CABIN.to_string();
    };

    match deck {
        // Single T-deck cabin in the manifest sits with the upper decks
        'A' | 'B' | 'C' | 'T' => "ABC".to_string(),
        'D' | 'E' | 'F' | 'G' => "DEFG".to_string(),
        other => other.to_string(),
    }
}

/// Groups the cabin deck letter and flags cabin presence
#[derive(Debug, Clone, Copy, Default)]
pub struct CabinTransform;

impl FeatureTransform for CabinTransform {
    fn name(&self) -> &'static str {
        "cabin"
    }

    fn transform(
        &self,
        record: &PassengerRecord,
        _lookups: &LookupTables,
        derived: &mut DerivedFeatures,
    ) -> Result<(), InferenceError> {
        derived.cabin_group = cabin_group(record.cabin_code());
        derived.has_cabin = derived.cabin_group != MISSING_CABIN;
        Ok(())
    }
}
