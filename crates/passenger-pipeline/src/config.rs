//! Pipeline configuration

use crate::PipelineError;
use config::{Config, Environment, File};
use feature_transform::AgeImputation;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable prefix, e.g. `TITANIC_DECISION_THRESHOLD`
pub const ENV_PREFIX: &str = "TITANIC";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Age imputation strategy used at fit time
    pub age_imputation: AgeImputation,

    /// Where fitted artifacts are written and read
    pub artifact_path: PathBuf,

    /// Probability at or above which a passenger is classed as a survivor
    pub decision_threshold: f64,

    /// Max log level for the CLI subscriber
    pub log_level: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            age_imputation: AgeImputation::default(),
            artifact_path: PathBuf::from("artifacts/pipeline.bin"),
            decision_threshold: 0.5,
            log_level: "info".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load from an optional file, then apply `TITANIC_*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, PipelineError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(0.0..=1.0).contains(&self.decision_threshold) {
            return Err(PipelineError::Config(format!(
                "decision_threshold must be within [0, 1], got {}",
                self.decision_threshold
            )));
        }
        Ok(())
    }
}
