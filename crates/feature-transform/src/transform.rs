//! Feature Transform Trait

use crate::derived::DerivedFeatures;
use crate::InferenceError;
use lookup_store::{FitError, LookupTables, PassengerRecord};
use tracing::warn;

/// One step of the transform chain
///
/// `fit` learns the lookups the step owns from training rows; `transform`
/// replays them on one record. Implementations hold no mutable state: the
/// same record and lookups always produce the same derived columns, so a
/// chain can be shared across threads.
pub trait FeatureTransform: Send + Sync {
    /// Step name used in logs
    fn name(&self) -> &'static str;

    /// Fit this step's lookups into `lookups`. Steps run in chain order, so a
    /// step may read tables fitted by earlier steps. Stateless steps keep the
    /// default.
    fn fit(&self, _rows: &[PassengerRecord], _lookups: &mut LookupTables) -> Result<(), FitError> {
        Ok(())
    }

    /// Write this step's derived columns for one record
    fn transform(
        &self,
        record: &PassengerRecord,
        lookups: &LookupTables,
        derived: &mut DerivedFeatures,
    ) -> Result<(), InferenceError>;
}

/// Resolve a grouped median, falling back to the global median
pub(crate) fn resolve_median(
    lookup: &'static str,
    key: impl FnOnce() -> String,
    group: Option<f64>,
    global: Option<f64>,
) -> Result<f64, InferenceError> {
    if let Some(value) = group {
        return Ok(value);
    }

    let key = key();
    match global {
        Some(value) => {
            warn!("No {} median for {}; using global median {}", lookup, key, value);
            Ok(value)
        }
        None => Err(InferenceError::MissingLookup { lookup, key }),
    }
}
