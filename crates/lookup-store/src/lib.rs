//! Lookup Store
//!
//! Passenger data model plus the statistics computed once from training data
//! and replayed, unchanged, for every serve-time record.

mod dataset;
mod error;
mod record;
mod statistics;
mod tables;
pub mod title;

pub use dataset::TrainingSet;
pub use error::{FitError, ValidationError};
pub use record::{PassengerRecord, Sex};
pub use statistics::{median, mode};
pub use tables::{ClassSexKey, GroupMedians, LookupTables, RareTitles, TicketCounts};
