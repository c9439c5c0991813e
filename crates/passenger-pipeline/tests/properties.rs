mod common;

use passenger_pipeline::{Artifacts, FittedPipeline, PassengerRecord, Sex};
use proptest::prelude::*;
use std::sync::LazyLock;

static FITTED: LazyLock<FittedPipeline> = LazyLock::new(common::fitted);

const TITLES: [&str; 9] = ["Mr", "Mrs", "Miss", "Master", "Dr", "Rev", "Col", "Mlle", "Countess"];
const TICKETS: [&str; 5] = ["CA. 2343", "349909", "113803", "11778", "PC 99999"];
const CABINS: [&str; 5] = ["C85", "E46", "T101", "B57 B59 B63 B66", "F G73"];

fn record() -> impl Strategy<Value = PassengerRecord> {
    (
        1u8..=3,
        any::<bool>(),
        proptest::option::of(0.0f64..=90.0),
        (0u32..9, 0u32..7),
        proptest::option::of(0.0f64..512.0),
        proptest::option::of(prop::sample::select(vec!["S", "C", "Q"])),
        prop::sample::select(TITLES.to_vec()),
        prop::sample::select(TICKETS.to_vec()),
        proptest::option::of(prop::sample::select(CABINS.to_vec())),
    )
        .prop_map(
            |(pclass, female, age, (sibsp, parch), fare, embarked, title, ticket, cabin)| {
                PassengerRecord {
                    pclass,
                    sex: if female { Sex::Female } else { Sex::Male },
                    age,
                    sibsp,
                    parch,
                    fare,
                    embarked: embarked.map(str::to_string),
                    name: format!("Doe, {}. Alex", title),
                    ticket: ticket.to_string(),
                    cabin: cabin.map(str::to_string),
                }
            },
        )
}

proptest! {
    #[test]
    fn transform_is_deterministic(r in record()) {
        let first = FITTED.transform_one(&r).unwrap();
        let second = FITTED.transform_one(&r).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn restored_artifacts_replay_identically(r in record()) {
        let bytes = FITTED.artifacts().to_bytes().unwrap();
        let restored = FittedPipeline::from_artifacts(Artifacts::from_bytes(&bytes).unwrap());
        prop_assert_eq!(restored.transform_one(&r).unwrap(), FITTED.transform_one(&r).unwrap());
    }

    #[test]
    fn present_age_passes_through(r in record(), age in 0.0f64..=90.0) {
        let mut r = r;
        r.age = Some(age);
        prop_assert_eq!(FITTED.derive(&r).unwrap().age, age);
        prop_assert_eq!(FITTED.transform_one(&r).unwrap()[2], age);
    }

    #[test]
    fn width_is_fixed(r in record()) {
        prop_assert_eq!(FITTED.transform_one(&r).unwrap().len(), FITTED.width());
    }

    #[test]
    fn batch_rows_are_independent(batch in proptest::collection::vec(record(), 1..8)) {
        let matrix = FITTED.transform(&batch).unwrap();
        prop_assert_eq!(matrix.len(), batch.len());
        for (row, r) in matrix.rows.iter().zip(&batch) {
            prop_assert_eq!(row, &FITTED.transform_one(r).unwrap());
        }

        let reversed: Vec<_> = batch.iter().rev().cloned().collect();
        let mut back = FITTED.transform(&reversed).unwrap().rows;
        back.reverse();
        prop_assert_eq!(back, matrix.rows);
    }

    #[test]
    fn unknown_port_encodes_to_zero_block(r in record(), port in "[A-Z]{2,4}") {
        let mut r = r;
        r.embarked = Some(port);
        let row = FITTED.transform_one(&r).unwrap();
        prop_assert_eq!(row.len(), 19);
        prop_assert!(row[16..19].iter().all(|v| *v == 0.0));
    }
}
