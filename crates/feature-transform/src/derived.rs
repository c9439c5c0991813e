//! Derived Feature Set

use crate::family::FamilyBin;
use lookup_store::PassengerRecord;
use serde::{Deserialize, Serialize};

/// Numeric columns, in encoder order
pub const NUMERIC_FEATURES: [&str; 5] = ["pclass", "sex", "age", "has_cabin", "fare_per_person"];

/// Categorical columns, in encoder order
pub const CATEGORICAL_FEATURES: [&str; 4] = ["cabin_group", "title", "family_size", "embarked"];

/// Per-record features produced by the transform chain
///
/// Raw sibling/parent counts, fare, ticket and name are consumed by the chain
/// and never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    pub pclass: u8,
    /// Female 0, male 1
    pub sex: u8,
    /// Observed or imputed age
    pub age: f64,
    pub cabin_group: String,
    pub has_cabin: bool,
    pub title: String,
    pub family_bin: FamilyBin,
    pub fare_per_person: f64,
    pub embarked: String,
}

impl DerivedFeatures {
    /// Seed a feature set with the pass-through columns of a record
    pub fn new(record: &PassengerRecord) -> Self {
        Self {
            pclass: record.pclass,
            sex: 0,
            age: 0.0,
            cabin_group: String::new(),
            has_cabin: false,
            title: String::new(),
            family_bin: FamilyBin::Alone,
            fare_per_person: 0.0,
            embarked: String::new(),
        }
    }

    /// Values of [`NUMERIC_FEATURES`], in the same order
    pub fn numeric_values(&self) -> [f64; 5] {
        [
            self.pclass as f64,
            self.sex as f64,
            self.age,
            if self.has_cabin { 1.0 } else { 0.0 },
            self.fare_per_person,
        ]
    }

    /// Values of [`CATEGORICAL_FEATURES`], in the same order
    pub fn categorical_values(&self) -> [&str; 4] {
        [
            self.cabin_group.as_str(),
            self.title.as_str(),
            self.family_bin.as_str(),
            self.embarked.as_str(),
        ]
    }
}
