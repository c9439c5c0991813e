//! Training Set Loader
//!
//! Reads the passenger manifest CSV. Columns are located by header name, so
//! column order does not matter and extra columns (survival label, boat,
//! destination) are ignored.

use crate::error::{FitError, ValidationError};
use crate::record::{PassengerRecord, Sex};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Column positions resolved from the header row
struct Columns {
    pclass: usize,
    sex: usize,
    age: usize,
    sibsp: usize,
    parch: usize,
    fare: usize,
    embarked: usize,
    name: usize,
    ticket: usize,
    cabin: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, FitError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column))
                .ok_or(FitError::MissingColumn(column))
        };

        Ok(Self {
            pclass: find("pclass")?,
            sex: find("sex")?,
            age: find("age")?,
            sibsp: find("sibsp")?,
            parch: find("parch")?,
            fare: find("fare")?,
            embarked: find("embarked")?,
            name: find("name")?,
            ticket: find("ticket")?,
            cabin: find("cabin")?,
        })
    }
}

/// Training rows loaded from a manifest
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    records: Vec<PassengerRecord>,
}

impl TrainingSet {
    /// Wrap already-parsed records
    pub fn new(records: Vec<PassengerRecord>) -> Self {
        Self { records }
    }

    /// Load a headered CSV file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FitError> {
        let path = path.as_ref();
        info!("Loading training set from {}", path.display());
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Parse headered CSV from any reader
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, FitError> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
        let columns = Columns::resolve(rdr.headers()?)?;

        let mut records = Vec::new();
        for (index, result) in rdr.records().enumerate() {
            let row = result?;
            let record =
                parse_row(&row, &columns).map_err(|source| FitError::InvalidRow { index, source })?;
            records.push(record);
        }

        debug!("Parsed {} training rows", records.len());
        Ok(Self { records })
    }

    /// Training rows
    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Take ownership of the rows
    pub fn into_records(self) -> Vec<PassengerRecord> {
        self.records
    }
}

fn cell(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("").trim()
}

fn optional_text(row: &StringRecord, idx: usize) -> Option<String> {
    let value = cell(row, idx);
    (!value.is_empty()).then(|| value.to_string())
}

fn optional_number(
    row: &StringRecord,
    idx: usize,
    field: &'static str,
) -> Result<Option<f64>, ValidationError> {
    let value = cell(row, idx);
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidValue {
            field,
            value: value.to_string(),
        })
}

fn count(row: &StringRecord, idx: usize, field: &'static str) -> Result<u32, ValidationError> {
    let value = cell(row, idx);
    value.parse::<u32>().map_err(|_| ValidationError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_row(row: &StringRecord, columns: &Columns) -> Result<PassengerRecord, ValidationError> {
    let pclass_raw = cell(row, columns.pclass);
    let pclass = pclass_raw
        .parse::<u8>()
        .map_err(|_| ValidationError::InvalidValue {
            field: "pclass",
            value: pclass_raw.to_string(),
        })?;

    Ok(PassengerRecord {
        pclass,
        sex: cell(row, columns.sex).parse::<Sex>()?,
        age: optional_number(row, columns.age, "age")?,
        sibsp: count(row, columns.sibsp, "sibsp")?,
        parch: count(row, columns.parch, "parch")?,
        fare: optional_number(row, columns.fare, "fare")?,
        embarked: optional_text(row, columns.embarked),
        name: cell(row, columns.name).to_string(),
        ticket: cell(row, columns.ticket).to_string(),
        cabin: optional_text(row, columns.cabin),
    })
}
