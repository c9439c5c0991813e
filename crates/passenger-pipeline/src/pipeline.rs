//! Fit and transform entry points

use crate::artifacts::Artifacts;
use crate::config::PipelineConfig;
use crate::PipelineError;
use feature_encoder::EncoderSchema;
use feature_transform::{AgeImputation, DerivedFeatures, InferenceError, TransformChain};
use lookup_store::{FitError, LookupTables, PassengerRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Encoded rows with their column names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// Unfitted pipeline
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Learn lookups and the encoder schema from training rows.
    ///
    /// Each chain step fits its own lookups, then the training rows go through
    /// the same chain serving will use, so the category universe reflects
    /// fully derived values.
    pub fn fit(&self, rows: &[PassengerRecord]) -> Result<FittedPipeline, FitError> {
        let strategy = self.config.age_imputation;
        info!(
            "Fitting pipeline on {} rows (age imputation {})",
            rows.len(),
            strategy.as_str()
        );

        let chain = TransformChain::new(strategy);
        let lookups = chain.fit(rows)?;

        let derived = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                chain
                    .apply(row, &lookups)
                    .map_err(|err| FitError::Underivable {
                        index,
                        reason: err.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let schema = EncoderSchema::fit(&derived)?;
        info!("Pipeline fitted: {} output columns", schema.width());

        Ok(FittedPipeline {
            artifacts: Artifacts::new(strategy, lookups, schema),
            chain,
        })
    }

    /// Fit, then transform the same rows
    pub fn fit_transform(
        &self,
        rows: &[PassengerRecord],
    ) -> Result<(FittedPipeline, FeatureMatrix), PipelineError> {
        let fitted = self.fit(rows)?;
        let matrix = fitted.transform(rows)?;
        Ok((fitted, matrix))
    }
}

/// Pipeline with frozen artifacts, ready to transform serve-time records
#[derive(Debug)]
pub struct FittedPipeline {
    artifacts: Artifacts,
    chain: TransformChain,
}

impl FittedPipeline {
    /// Rebuild the chain from stored artifacts
    pub fn from_artifacts(artifacts: Artifacts) -> Self {
        let chain = TransformChain::new(artifacts.age_imputation);
        Self { artifacts, chain }
    }

    /// Load artifacts from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        Artifacts::load_from_file(path).map(Self::from_artifacts)
    }

    /// Get artifacts
    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Consume into artifacts
    pub fn into_artifacts(self) -> Artifacts {
        self.artifacts
    }

    /// Get encoder schema
    pub fn schema(&self) -> &EncoderSchema {
        &self.artifacts.schema
    }

    /// Get lookup tables
    pub fn lookups(&self) -> &LookupTables {
        &self.artifacts.lookups
    }

    /// Age strategy frozen at fit time
    pub fn age_imputation(&self) -> AgeImputation {
        self.artifacts.age_imputation
    }

    /// Output width
    pub fn width(&self) -> usize {
        self.artifacts.schema.width()
    }

    /// Output column names
    pub fn column_names(&self) -> Vec<String> {
        self.artifacts.schema.column_names()
    }

    /// Derived (pre-encoding) features for one record
    pub fn derive(&self, record: &PassengerRecord) -> Result<DerivedFeatures, InferenceError> {
        self.chain.apply(record, &self.artifacts.lookups)
    }

    /// Encoded feature vector for one record
    pub fn transform_one(&self, record: &PassengerRecord) -> Result<Vec<f64>, InferenceError> {
        let derived = self.derive(record)?;
        Ok(self.artifacts.schema.encode(&derived))
    }

    /// Encode a batch; the first failing record aborts with its index
    pub fn transform(&self, records: &[PassengerRecord]) -> Result<FeatureMatrix, PipelineError> {
        let rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                self.transform_one(record)
                    .map_err(|source| PipelineError::Record { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Transformed {} records", rows.len());
        Ok(FeatureMatrix {
            columns: self.column_names(),
            rows,
        })
    }
}
