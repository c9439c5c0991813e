//! Lookup Tables
//!
//! Every statistic here is computed from training rows only. Each transform
//! step fits its own table; once fitting is done the tables are read-only and
//! serving code only ever holds shared references to them.

use crate::record::Sex;
use crate::statistics::median;
use crate::title::{canonical_title, RARE_TITLE, REFERENCE_TITLE};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;

/// Grouping key for class/sex keyed medians
pub type ClassSexKey = (u8, Sex);

/// Medians per group with a global median fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMedians<K: Ord> {
    groups: BTreeMap<K, f64>,
    global: Option<f64>,
}

impl<K: Ord> Default for GroupMedians<K> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
            global: None,
        }
    }
}

impl<K: Ord> GroupMedians<K> {
    /// Compute medians from `(key, value)` observations, skipping missing values
    pub fn fit<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<f64>)>,
    {
        let mut by_group: BTreeMap<K, Vec<f64>> = BTreeMap::new();
        let mut all = Vec::new();

        for (key, value) in observations {
            if let Some(v) = value {
                by_group.entry(key).or_default().push(v);
                all.push(v);
            }
        }

        let groups = by_group
            .into_iter()
            .filter_map(|(key, values)| median(&values).map(|m| (key, m)))
            .collect();

        Self {
            groups,
            global: median(&all),
        }
    }

    /// Median for the group, if the group had any observed value
    pub fn group<Q>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.groups.get(key).copied()
    }

    /// Median over every observed value
    pub fn global(&self) -> Option<f64> {
        self.global
    }

    /// Number of groups with a median
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no group has a median
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Number of training rows sharing each ticket string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketCounts {
    counts: BTreeMap<String, u32>,
}

impl TicketCounts {
    /// Count identical ticket strings
    pub fn fit<'a, I>(tickets: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = BTreeMap::new();
        for ticket in tickets {
            *counts.entry(ticket.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Co-traveler count for an exact ticket string
    pub fn get(&self, ticket: &str) -> Option<u32> {
        self.counts.get(ticket).copied()
    }

    /// Number of distinct tickets
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no ticket was counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Title frequencies, used to fold infrequent honorifics into the "Rare" bucket
///
/// A title is rare when its training count is strictly below the count of
/// [`REFERENCE_TITLE`]. Titles never seen in training count as zero and are
/// rare too. Without any reference title in training nothing is rare.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RareTitles {
    counts: BTreeMap<String, usize>,
    threshold: usize,
}

impl RareTitles {
    /// Count canonical titles and take the reference title's count as threshold
    pub fn fit<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for title in names.into_iter().filter_map(canonical_title) {
            *counts.entry(title.to_string()).or_insert(0) += 1;
        }

        let threshold = counts.get(REFERENCE_TITLE).copied().unwrap_or(0);
        Self { counts, threshold }
    }

    /// Training count of the reference title
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Check if a normalized title is rare
    pub fn contains(&self, title: &str) -> bool {
        self.counts.get(title).copied().unwrap_or(0) < self.threshold
    }

    /// Replace a rare title with the catch-all
    pub fn fold<'a>(&self, title: &'a str) -> &'a str {
        if self.contains(title) {
            RARE_TITLE
        } else {
            title
        }
    }

    /// Title group for a full name; unparseable names land in the catch-all
    pub fn title_group(&self, name: &str) -> String {
        canonical_title(name)
            .map(|t| self.fold(t))
            .unwrap_or(RARE_TITLE)
            .to_string()
    }

    /// Iterate the training titles that fold to the catch-all, sorted
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.counts
            .iter()
            .filter(|(_, count)| **count < self.threshold)
            .map(|(title, _)| title.as_str())
    }

    /// Number of training titles that are rare
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check if no training title is rare
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All statistics the transform chain replays at serving time
///
/// Starts empty; each transform step fills the tables it owns during fit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTables {
    age_by_title: GroupMedians<String>,
    age_by_class_sex: GroupMedians<ClassSexKey>,
    fare_by_class_sex: GroupMedians<ClassSexKey>,
    ticket_counts: TicketCounts,
    embarked_mode: String,
    rare_titles: RareTitles,
}

impl LookupTables {
    /// Age medians keyed by title group
    pub fn age_by_title(&self) -> &GroupMedians<String> {
        &self.age_by_title
    }

    /// Age medians keyed by (class, sex)
    pub fn age_by_class_sex(&self) -> &GroupMedians<ClassSexKey> {
        &self.age_by_class_sex
    }

    /// Fare medians keyed by (class, sex)
    pub fn fare_by_class_sex(&self) -> &GroupMedians<ClassSexKey> {
        &self.fare_by_class_sex
    }

    /// Co-traveler counts per ticket
    pub fn ticket_counts(&self) -> &TicketCounts {
        &self.ticket_counts
    }

    /// Most frequent embarkation port
    pub fn embarked_mode(&self) -> &str {
        &self.embarked_mode
    }

    /// Titles folded into the catch-all bucket
    pub fn rare_titles(&self) -> &RareTitles {
        &self.rare_titles
    }

    pub fn set_age_by_title(&mut self, medians: GroupMedians<String>) {
        self.age_by_title = medians;
    }

    pub fn set_age_by_class_sex(&mut self, medians: GroupMedians<ClassSexKey>) {
        self.age_by_class_sex = medians;
    }

    pub fn set_fare_by_class_sex(&mut self, medians: GroupMedians<ClassSexKey>) {
        self.fare_by_class_sex = medians;
    }

    pub fn set_ticket_counts(&mut self, counts: TicketCounts) {
        self.ticket_counts = counts;
    }

    pub fn set_embarked_mode(&mut self, port: String) {
        self.embarked_mode = port;
    }

    pub fn set_rare_titles(&mut self, titles: RareTitles) {
        self.rare_titles = titles;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_medians_with_fallback() {
        let ages = GroupMedians::fit([
            ((3, Sex::Male), Some(20.0)),
            ((3, Sex::Male), Some(30.0)),
            ((3, Sex::Male), None),
            ((1, Sex::Female), Some(40.0)),
            ((3, Sex::Male), Some(4.0)),
            ((3, Sex::Male), Some(6.0)),
            ((1, Sex::Male), Some(50.0)),
            ((2, Sex::Female), Some(60.0)),
        ]);
        assert_eq!(ages.group(&(3, Sex::Male)), Some(13.0));
        assert_eq!(ages.group(&(2, Sex::Male)), None);
        // Sorted observed ages: 4, 6, 20, 30, 40, 50, 60
        assert_eq!(ages.global(), Some(30.0));
        assert_eq!(ages.len(), 4);
    }

    #[test]
    fn test_group_without_observations_is_dropped() {
        let medians = GroupMedians::fit([("Mr".to_string(), None), ("Mrs".to_string(), Some(31.0))]);
        assert_eq!(medians.group("Mr"), None);
        assert_eq!(medians.group("Mrs"), Some(31.0));
        assert_eq!(medians.global(), Some(31.0));
    }

    #[test]
    fn test_empty_medians() {
        let medians: GroupMedians<String> = GroupMedians::default();
        assert!(medians.is_empty());
        assert_eq!(medians.global(), None);
    }

    const NAMES: [&str; 8] = [
        "A, Mr. One",
        "B, Mr. Two",
        "C, Mr. Three",
        "D, Mrs. Four",
        "E, Master. Five",
        "F, Master. Six",
        "G, Dr. Seven",
        "H, Mme. Eight",
    ];

    #[test]
    fn test_rare_titles_below_reference() {
        let rare = RareTitles::fit(NAMES);
        // Master appears twice; Dr once, Mrs twice (Mme folds in), Mr three times
        assert_eq!(rare.threshold(), 2);
        assert!(rare.contains("Dr"));
        assert!(!rare.contains("Mrs"));
        assert!(!rare.contains("Master"));
        assert_eq!(rare.iter().collect::<Vec<_>>(), ["Dr"]);
        assert_eq!(rare.title_group("G, Dr. Seven"), "Rare");
        assert_eq!(rare.title_group("no title at all"), "Rare");
    }

    #[test]
    fn test_title_unseen_in_training_is_rare() {
        let rare = RareTitles::fit(NAMES);
        assert!(rare.contains("Capt"));
        assert_eq!(rare.title_group("Crosby, Capt. Edward Gifford"), "Rare");
        assert_eq!(rare.title_group("Rothes, Countess. of"), "Rare");
        // Synonyms resolve before the frequency check
        assert_eq!(rare.title_group("Aubart, Mme. Leontine"), "Mrs");
        assert_eq!(rare.len(), 1);
    }

    #[test]
    fn test_no_reference_title_means_no_rare_titles() {
        let rare = RareTitles::fit(["A, Mr. X", "B, Dr. Y"]);
        assert!(rare.is_empty());
        assert_eq!(rare.title_group("C, Capt. Z"), "Capt");
    }

    #[test]
    fn test_ticket_counts() {
        let counts = TicketCounts::fit(["T1", "T1", "T1", "T2", "T3"]);
        assert_eq!(counts.get("T1"), Some(3));
        assert_eq!(counts.get("T2"), Some(1));
        assert_eq!(counts.get("unseen"), None);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_setters_replace_tables() {
        let mut tables = LookupTables::default();
        assert_eq!(tables.embarked_mode(), "");
        tables.set_embarked_mode("S".to_string());
        tables.set_ticket_counts(TicketCounts::fit(["T1", "T1"]));
        assert_eq!(tables.embarked_mode(), "S");
        assert_eq!(tables.ticket_counts().get("T1"), Some(2));
    }
}
