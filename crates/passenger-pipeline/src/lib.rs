//! Passenger Feature Pipeline
//!
//! Composes the lookup store, transform chain and encoder:
//! [`Pipeline::fit`] builds frozen [`Artifacts`] from training rows and
//! [`FittedPipeline::transform`] replays them on serve-time records.

mod artifacts;
mod config;
mod pipeline;
mod serving;

pub use artifacts::{Artifacts, ARTIFACT_FORMAT_VERSION};
pub use self::config::{PipelineConfig, ENV_PREFIX};
pub use pipeline::{FeatureMatrix, FittedPipeline, Pipeline};
pub use serving::{Classifier, Prediction, ServingContext, NOT_SURVIVED_LABEL, SURVIVED_LABEL};

pub use feature_encoder::EncoderSchema;
pub use feature_transform::{AgeImputation, DerivedFeatures, InferenceError};
pub use lookup_store::{FitError, LookupTables, PassengerRecord, Sex, TrainingSet};

use thiserror::Error;

/// Pipeline-level errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fit(#[from] FitError),

    /// A record in a batch failed; the index points into the input slice
    #[error("Record {index} failed: {source}")]
    Record {
        index: usize,
        #[source]
        source: InferenceError,
    },

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Classifier expects {expected} features, pipeline produces {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<postcard::Error> for PipelineError {
    fn from(err: postcard::Error) -> Self {
        PipelineError::Artifact(err.to_string())
    }
}

impl From<feature_encoder::EncoderError> for PipelineError {
    fn from(err: feature_encoder::EncoderError) -> Self {
        PipelineError::Artifact(err.to_string())
    }
}

impl From<::config::ConfigError> for PipelineError {
    fn from(err: ::config::ConfigError) -> Self {
        PipelineError::Config(err.to_string())
    }
}
