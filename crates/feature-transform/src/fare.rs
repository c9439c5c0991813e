//! Fare Per Person Step

use crate::derived::DerivedFeatures;
use crate::transform::{resolve_median, FeatureTransform};
use crate::InferenceError;
use lookup_store::{FitError, GroupMedians, LookupTables, PassengerRecord, TicketCounts};
use tracing::{debug, warn};

/// Splits the ticket fare across the passengers who shared the ticket at training time
#[derive(Debug, Clone, Copy, Default)]
pub struct FarePerPersonTransform;

impl FarePerPersonTransform {
    /// Co-traveler count for the ticket; unseen tickets count as a solo traveler
    pub fn people_in_ticket(record: &PassengerRecord, lookups: &LookupTables) -> u32 {
        match lookups.ticket_counts().get(&record.ticket) {
            Some(count) if count > 0 => count,
            _ => {
                debug!("Ticket {:?} not seen in training; assuming solo traveler", record.ticket);
                1
            }
        }
    }
}

impl FeatureTransform for FarePerPersonTransform {
    fn name(&self) -> &'static str {
        "fare_per_person"
    }

    fn fit(&self, rows: &[PassengerRecord], lookups: &mut LookupTables) -> Result<(), FitError> {
        let medians = GroupMedians::fit(rows.iter().map(|r| (r.class_sex(), r.fare)));
        if medians.global().is_none() {
            warn!("No observed fares in training data; records without fare cannot be imputed");
        }

        lookups.set_fare_by_class_sex(medians);
        lookups.set_ticket_counts(TicketCounts::fit(rows.iter().map(|r| r.ticket.as_str())));
        Ok(())
    }

    fn transform(
        &self,
        record: &PassengerRecord,
        lookups: &LookupTables,
        derived: &mut DerivedFeatures,
    ) -> Result<(), InferenceError> {
        let fare = match record.fare {
            Some(fare) => fare,
            None => {
                let medians = lookups.fare_by_class_sex();
                resolve_median(
                    "fare",
                    || format!("class {} {}", record.pclass, record.sex),
                    medians.group(&record.class_sex()),
                    medians.global(),
                )?
            }
        };

        derived.fare_per_person = fare / Self::people_in_ticket(record, lookups) as f64;
        Ok(())
    }
}
