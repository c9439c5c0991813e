//! Serving context
//!
//! Built once at startup from artifacts and a classifier, then shared
//! read-only (e.g. behind an `Arc`) across request handlers.

use crate::config::PipelineConfig;
use crate::pipeline::FittedPipeline;
use crate::PipelineError;
use feature_transform::InferenceError;
use lookup_store::PassengerRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

pub const SURVIVED_LABEL: &str = "Survived";
pub const NOT_SURVIVED_LABEL: &str = "Did not survive";

/// Scores an encoded feature vector
pub trait Classifier: Send + Sync {
    /// Survival probability in [0, 1]
    fn predict_proba(&self, features: &[f64]) -> f64;

    /// Input width the classifier was trained on, if known
    fn expected_width(&self) -> Option<usize> {
        None
    }
}

/// Survival prediction for one passenger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub survival_probability: f64,
    pub survived: bool,
    pub label: String,
}

impl Prediction {
    /// Apply the decision threshold to a probability
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        let survived = probability >= threshold;
        Self {
            survival_probability: probability,
            survived,
            label: if survived { SURVIVED_LABEL } else { NOT_SURVIVED_LABEL }.to_string(),
        }
    }
}

/// Immutable serving state
pub struct ServingContext {
    pipeline: FittedPipeline,
    classifier: Box<dyn Classifier>,
    threshold: f64,
}

impl ServingContext {
    /// Create a new serving context
    pub fn new<C>(pipeline: FittedPipeline, classifier: C, threshold: f64) -> Result<Self, PipelineError>
    where
        C: Classifier + 'static,
    {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(PipelineError::Config(format!(
                "decision_threshold must be within [0, 1], got {}",
                threshold
            )));
        }

        if let Some(expected) = classifier.expected_width() {
            let actual = pipeline.width();
            if expected != actual {
                return Err(PipelineError::WidthMismatch { expected, actual });
            }
        }

        info!(
            "Serving context ready: {} features, threshold {}",
            pipeline.width(),
            threshold
        );

        Ok(Self {
            pipeline,
            classifier: Box::new(classifier),
            threshold,
        })
    }

    /// Load artifacts from the configured path
    pub fn from_config<C>(config: &PipelineConfig, classifier: C) -> Result<Self, PipelineError>
    where
        C: Classifier + 'static,
    {
        let pipeline = FittedPipeline::load(&config.artifact_path)?;
        Self::new(pipeline, classifier, config.decision_threshold)
    }

    /// Get fitted pipeline
    pub fn pipeline(&self) -> &FittedPipeline {
        &self.pipeline
    }

    /// Get decision threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Predict one record
    pub fn predict_one(&self, record: &PassengerRecord) -> Result<Prediction, InferenceError> {
        let features = self.pipeline.transform_one(record)?;
        let probability = self.classifier.predict_proba(&features);
        debug!("Survival probability {:.3}", probability);
        Ok(Prediction::from_probability(probability, self.threshold))
    }

    /// Predict a batch; the first failing record aborts with its index
    pub fn predict(&self, records: &[PassengerRecord]) -> Result<Vec<Prediction>, PipelineError> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                self.predict_one(record)
                    .map_err(|source| PipelineError::Record { index, source })
            })
            .collect()
    }
}

impl fmt::Debug for ServingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServingContext")
            .field("pipeline", &self.pipeline)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
