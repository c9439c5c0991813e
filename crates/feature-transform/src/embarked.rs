//! Embarkation Port Step

use crate::derived::DerivedFeatures;
use crate::transform::FeatureTransform;
use crate::InferenceError;
use lookup_store::{mode, FitError, LookupTables, PassengerRecord};

/// Fills a missing port with the training mode
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbarkedTransform;

impl FeatureTransform for EmbarkedTransform {
    fn name(&self) -> &'static str {
        "embarked"
    }

    fn fit(&self, rows: &[PassengerRecord], lookups: &mut LookupTables) -> Result<(), FitError> {
        let port = mode(rows.iter().filter_map(PassengerRecord::embarked_port))
            .ok_or(FitError::MissingColumn("embarked"))?;
        lookups.set_embarked_mode(port);
        Ok(())
    }

    fn transform(
        &self,
        record: &PassengerRecord,
        lookups: &LookupTables,
        derived: &mut DerivedFeatures,
    ) -> Result<(), InferenceError> {
        derived.embarked = record
            .embarked_port()
            .unwrap_or_else(|| lookups.embarked_mode())
            .to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{lookups, sparse_record, training_rows};

    fn port(embarked: Option<&str>) -> String {
        let mut record = sparse_record();
        record.embarked = embarked.map(str::to_string);
        let mut derived = DerivedFeatures::new(&record);
        EmbarkedTransform.transform(&record, &lookups(), &mut derived).unwrap();
        derived.embarked
    }

    #[test]
    fn test_missing_port_uses_mode() {
        assert_eq!(port(None), "S");
        assert_eq!(port(Some("")), "S");
    }

    #[test]
    fn test_fit_takes_mode() {
        let mut tables = LookupTables::default();
        EmbarkedTransform.fit(&training_rows(), &mut tables).unwrap();
        assert_eq!(tables.embarked_mode(), "S");
    }

    #[test]
    fn test_fit_without_any_port() {
        let rows: Vec<_> = training_rows()
            .into_iter()
            .map(|mut r| {
                r.embarked = None;
                r
            })
            .collect();
        let err = EmbarkedTransform.fit(&rows, &mut LookupTables::default()).unwrap_err();
        assert!(matches!(err, FitError::MissingColumn("embarked")));
    }

    #[test]
    fn test_observed_port_kept() {
        assert_eq!(port(Some("Q")), "Q");
        // Out-of-set ports are not rewritten here; the encoder handles them
        assert_eq!(port(Some("X")), "X");
    }
}
