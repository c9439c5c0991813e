//! Age Imputation Step

use crate::derived::DerivedFeatures;
use crate::transform::{resolve_median, FeatureTransform};
use crate::InferenceError;
use lookup_store::{FitError, GroupMedians, LookupTables, PassengerRecord};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Grouping key for the age median lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeImputation {
    /// Median of the passenger's title group (requires the title step first)
    #[default]
    TitleGroup,
    /// Median of the passenger's (class, sex) group
    ClassSex,
}

impl AgeImputation {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeImputation::TitleGroup => "title-group",
            AgeImputation::ClassSex => "class-sex",
        }
    }
}

/// Fills missing ages from the frozen medians; observed ages pass through
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeTransform {
    strategy: AgeImputation,
}

impl AgeTransform {
    /// Create an age step using the given grouping
    pub fn new(strategy: AgeImputation) -> Self {
        Self { strategy }
    }
}

impl FeatureTransform for AgeTransform {
    fn name(&self) -> &'static str {
        "age"
    }

    /// Fits both groupings so artifacts can be inspected either way; title
    /// groups come from the rare-title table fitted by the title step.
    fn fit(&self, rows: &[PassengerRecord], lookups: &mut LookupTables) -> Result<(), FitError> {
        let rare_titles = lookups.rare_titles();
        let by_title =
            GroupMedians::fit(rows.iter().map(|r| (rare_titles.title_group(&r.name), r.age)));
        let by_class_sex = GroupMedians::fit(rows.iter().map(|r| (r.class_sex(), r.age)));

        if by_class_sex.global().is_none() {
            warn!("No observed ages in training data; records without age cannot be imputed");
        }

        lookups.set_age_by_title(by_title);
        lookups.set_age_by_class_sex(by_class_sex);
        Ok(())
    }

    fn transform(
        &self,
        record: &PassengerRecord,
        lookups: &LookupTables,
        derived: &mut DerivedFeatures,
    ) -> Result<(), InferenceError> {
        if let Some(age) = record.age {
            derived.age = age;
            return Ok(());
        }

        derived.age = match self.strategy {
            AgeImputation::TitleGroup => {
                let medians = lookups.age_by_title();
                resolve_median(
                    "age",
                    || format!("title {}", derived.title),
                    medians.group(derived.title.as_str()),
                    medians.global(),
                )?
            }
            AgeImputation::ClassSex => {
                let medians = lookups.age_by_class_sex();
                resolve_median(
                    "age",
                    || format!("class {} {}", record.pclass, record.sex),
                    medians.group(&record.class_sex()),
                    medians.global(),
                )?
            }
        };
        Ok(())
    }
}
