//! Ordered Transform Chain

use crate::age::{AgeImputation, AgeTransform};
use crate::cabin::CabinTransform;
use crate::derived::DerivedFeatures;
use crate::embarked::EmbarkedTransform;
use crate::family::FamilySizeTransform;
use crate::fare::FarePerPersonTransform;
use crate::sex::SexTransform;
use crate::title::TitleTransform;
use crate::transform::FeatureTransform;
use crate::InferenceError;
use lookup_store::{FitError, LookupTables, PassengerRecord};
use std::fmt;
use tracing::{debug, info};

/// Transforms applied in order to every record
pub struct TransformChain {
    steps: Vec<Box<dyn FeatureTransform>>,
}

impl TransformChain {
    /// Standard chain; title runs before age so title-keyed imputation can see it
    pub fn new(age_imputation: AgeImputation) -> Self {
        Self::from_steps(vec![
            Box::new(TitleTransform),
            Box::new(AgeTransform::new(age_imputation)),
            Box::new(CabinTransform),
            Box::new(FamilySizeTransform),
            Box::new(FarePerPersonTransform),
            Box::new(EmbarkedTransform),
            Box::new(SexTransform),
        ])
    }

    /// Chain from explicit steps. Every [`DerivedFeatures`] field has to be
    /// written by some step; fields no step touches keep their seed values.
    pub(crate) fn from_steps(steps: Vec<Box<dyn FeatureTransform>>) -> Self {
        Self { steps }
    }

    /// Step names in application order
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Validate every training row, then fit each step's lookups in chain order
    pub fn fit(&self, rows: &[PassengerRecord]) -> Result<LookupTables, FitError> {
        if rows.is_empty() {
            return Err(FitError::EmptyTrainingSet);
        }

        for (index, row) in rows.iter().enumerate() {
            row.validate()
                .map_err(|source| FitError::InvalidRow { index, source })?;
        }

        let mut lookups = LookupTables::default();
        for step in &self.steps {
            step.fit(rows, &mut lookups)?;
            debug!("Fitted {} step", step.name());
        }

        info!(
            "Fitted lookup tables from {} rows: {} tickets, {} title groups, rare titles {:?}, embarked mode {}",
            rows.len(),
            lookups.ticket_counts().len(),
            lookups.age_by_title().len(),
            lookups.rare_titles().iter().collect::<Vec<_>>(),
            lookups.embarked_mode()
        );
        Ok(lookups)
    }

    /// Validate a record and derive its features
    pub fn apply(
        &self,
        record: &PassengerRecord,
        lookups: &LookupTables,
    ) -> Result<DerivedFeatures, InferenceError> {
        record.validate()?;

        let mut derived = DerivedFeatures::new(record);
        for step in &self.steps {
            step.transform(record, lookups, &mut derived)?;
        }

        debug!("Derived features: {:?}", derived);
        Ok(derived)
    }
}

impl Default for TransformChain {
    fn default() -> Self {
        Self::new(AgeImputation::default())
    }
}

impl fmt::Debug for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformChain")
            .field("steps", &self.step_names())
            .finish()
    }
}
