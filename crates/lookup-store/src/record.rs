//! Passenger Record

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Valid passenger class range
pub const CLASS_RANGE: (u8, u8) = (1, 3);
/// Valid age range (years)
pub const AGE_RANGE: (f64, f64) = (0.0, 90.0);

/// Passenger sex as recorded on the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Sex::Female),
            "male" => Ok(Sex::Male),
            _ => Err(ValidationError::InvalidValue {
                field: "sex",
                value: s.to_string(),
            }),
        }
    }
}

/// Raw passenger record, one per request or training row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerRecord {
    /// Ticket class (1-3)
    pub pclass: u8,
    pub sex: Sex,
    pub age: Option<f64>,
    /// Siblings/spouses aboard
    pub sibsp: u32,
    /// Parents/children aboard
    pub parch: u32,
    pub fare: Option<f64>,
    /// Port of embarkation, usually one of S, C, Q
    #[serde(default)]
    pub embarked: Option<String>,
    /// Full name, "Surname, Title. Given names"
    pub name: String,
    pub ticket: String,
    #[serde(default)]
    pub cabin: Option<String>,
}

impl PassengerRecord {
    /// Check the record against the accepted request schema
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pclass < CLASS_RANGE.0 || self.pclass > CLASS_RANGE.1 {
            return Err(ValidationError::OutOfRange {
                field: "pclass",
                value: self.pclass as f64,
                min: CLASS_RANGE.0 as f64,
                max: CLASS_RANGE.1 as f64,
            });
        }

        if let Some(age) = self.age {
            if !age.is_finite() {
                return Err(ValidationError::NotFinite("age"));
            }
            if age < AGE_RANGE.0 || age > AGE_RANGE.1 {
                return Err(ValidationError::OutOfRange {
                    field: "age",
                    value: age,
                    min: AGE_RANGE.0,
                    max: AGE_RANGE.1,
                });
            }
        }

        if let Some(fare) = self.fare {
            if !fare.is_finite() {
                return Err(ValidationError::NotFinite("fare"));
            }
            if fare < 0.0 {
                return Err(ValidationError::OutOfRange {
                    field: "fare",
                    value: fare,
                    min: 0.0,
                    max: f64::INFINITY,
                });
            }
        }

        Ok(())
    }

    /// Embarkation port, treating blank strings as missing
    pub fn embarked_port(&self) -> Option<&str> {
        non_blank(self.embarked.as_deref())
    }

    /// Cabin code, treating blank strings as missing
    pub fn cabin_code(&self) -> Option<&str> {
        non_blank(self.cabin.as_deref())
    }

    /// Class/sex grouping key used by the median lookups
    pub fn class_sex(&self) -> (u8, Sex) {
        (self.pclass, self.sex)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
