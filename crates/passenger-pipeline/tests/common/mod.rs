#![allow(dead_code)]

use passenger_pipeline::{FittedPipeline, PassengerRecord, Pipeline, PipelineConfig, Sex, TrainingSet};

pub const TRAIN_CSV: &str = include_str!("../data/train_sample.csv");

pub fn training_set() -> TrainingSet {
    TrainingSet::from_csv_reader(TRAIN_CSV.as_bytes()).expect("fixture parses")
}

pub fn fitted() -> FittedPipeline {
    Pipeline::new(PipelineConfig::default())
        .fit(training_set().records())
        .expect("fixture fits")
}

/// Third-class male with every optional field missing
pub fn olsen() -> PassengerRecord {
    PassengerRecord {
        pclass: 3,
        sex: Sex::Male,
        age: None,
        sibsp: 0,
        parch: 0,
        fare: None,
        embarked: None,
        name: "Olsen, Mr. Karl Siegwart".to_string(),
        ticket: "11778".to_string(),
        cabin: None,
    }
}
