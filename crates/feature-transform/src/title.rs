//! Title Extraction Step

use crate::derived::DerivedFeatures;
use crate::transform::FeatureTransform;
use crate::InferenceError;
use lookup_store::title::canonical_title;
use lookup_store::{FitError, LookupTables, PassengerRecord, RareTitles};
use tracing::debug;

/// Extracts the honorific, applies synonyms and folds rare titles
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleTransform;

impl FeatureTransform for TitleTransform {
    fn name(&self) -> &'static str {
        "title"
    }

    fn fit(&self, rows: &[PassengerRecord], lookups: &mut LookupTables) -> Result<(), FitError> {
        lookups.set_rare_titles(RareTitles::fit(rows.iter().map(|r| r.name.as_str())));
        Ok(())
    }

    fn transform(
        &self,
        record: &PassengerRecord,
        lookups: &LookupTables,
        derived: &mut DerivedFeatures,
    ) -> Result<(), InferenceError> {
        if canonical_title(&record.name).is_none() {
            debug!("No title in name {:?}; using catch-all", record.name);
        }
        derived.title = lookups.rare_titles().title_group(&record.name);
        Ok(())
    }
}
