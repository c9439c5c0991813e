//! Fit and Validation Error Types

use thiserror::Error;

/// Errors raised while checking a single passenger record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Numeric value is NaN or infinite
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    /// Value could not be parsed for the field
    #[error("Invalid {field} value: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Errors that abort building the lookup artifacts
#[derive(Debug, Error)]
pub enum FitError {
    /// No training rows at all
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// A column the lookups are grouped or computed on is entirely absent
    #[error("Required column missing from training data: {0}")]
    MissingColumn(&'static str),

    /// A training row failed validation or parsing
    #[error("Training row {index} is invalid: {source}")]
    InvalidRow {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// A training row could not be run through the transform chain
    #[error("Training row {index} could not be derived: {reason}")]
    Underivable { index: usize, reason: String },

    /// Training data could not be read
    #[error("Failed to read training data: {0}")]
    Read(String),
}

impl From<csv::Error> for FitError {
    fn from(err: csv::Error) -> Self {
        FitError::Read(err.to_string())
    }
}

impl From<std::io::Error> for FitError {
    fn from(err: std::io::Error) -> Self {
        FitError::Read(err.to_string())
    }
}
