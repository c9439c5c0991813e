//! Encoder Schema

use crate::EncoderError;
use feature_transform::{DerivedFeatures, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use lookup_store::FitError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// One-hot block for a categorical feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBlock {
    /// Feature name
    pub feature: String,
    /// Categories seen at fit time, sorted
    pub values: Vec<String>,
}

impl CategoryBlock {
    /// Output position of a category within the block
    pub fn position(&self, value: &str) -> Option<usize> {
        self.values
            .binary_search_by(|v| v.as_str().cmp(value))
            .ok()
    }
}

/// Frozen column layout: numeric pass-through columns, then one-hot blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderSchema {
    numeric: Vec<String>,
    blocks: Vec<CategoryBlock>,
    width: usize,
}

impl EncoderSchema {
    /// Learn the category universe from derived training rows
    pub fn fit(rows: &[DerivedFeatures]) -> Result<Self, FitError> {
        if rows.is_empty() {
            return Err(FitError::EmptyTrainingSet);
        }

        let mut seen: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); CATEGORICAL_FEATURES.len()];
        for row in rows {
            for (set, value) in seen.iter_mut().zip(row.categorical_values()) {
                set.insert(value);
            }
        }

        let blocks: Vec<CategoryBlock> = CATEGORICAL_FEATURES
            .iter()
            .zip(seen)
            .map(|(feature, values)| CategoryBlock {
                feature: feature.to_string(),
                values: values.into_iter().map(str::to_string).collect(),
            })
            .collect();

        let width = NUMERIC_FEATURES.len() + blocks.iter().map(|b| b.values.len()).sum::<usize>();
        info!(
            "Fitted encoder schema: {} columns from {} rows",
            width,
            rows.len()
        );

        Ok(Self {
            numeric: NUMERIC_FEATURES.iter().map(|s| s.to_string()).collect(),
            blocks,
            width,
        })
    }

    /// Number of output columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Output column names in order; one-hot columns read `feature=value`
    pub fn column_names(&self) -> Vec<String> {
        let mut names = self.numeric.clone();
        for block in &self.blocks {
            names.extend(
                block
                    .values
                    .iter()
                    .map(|v| format!("{}={}", block.feature, v)),
            );
        }
        names
    }

    /// Categories frozen for a feature
    pub fn categories(&self, feature: &str) -> Option<&[String]> {
        self.blocks
            .iter()
            .find(|b| b.feature == feature)
            .map(|b| b.values.as_slice())
    }

    /// Encode one row; unseen categories leave their block all zero
    pub fn encode(&self, features: &DerivedFeatures) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.width);
        out.extend_from_slice(&features.numeric_values());

        for (block, value) in self.blocks.iter().zip(features.categorical_values()) {
            let offset = out.len();
            out.resize(offset + block.values.len(), 0.0);
            match block.position(value) {
                Some(idx) => out[offset + idx] = 1.0,
                None => debug!("Unseen {} category {:?}; encoding as zeros", block.feature, value),
            }
        }

        out
    }

    /// Check that a loaded schema matches the derived feature layout of this build
    pub fn check_layout(&self) -> Result<(), EncoderError> {
        let block_names: Vec<&str> = self.blocks.iter().map(|b| b.feature.as_str()).collect();
        if self.numeric != NUMERIC_FEATURES || block_names != CATEGORICAL_FEATURES {
            return Err(EncoderError::LayoutMismatch {
                expected: format!("{:?} + {:?}", NUMERIC_FEATURES, CATEGORICAL_FEATURES),
                actual: format!("{:?} + {:?}", self.numeric, block_names),
            });
        }

        if let Some(block) = self
            .blocks
            .iter()
            .find(|b| !b.values.windows(2).all(|w| w[0] < w[1]))
        {
            return Err(EncoderError::UnsortedCategories {
                feature: block.feature.clone(),
            });
        }

        let computed =
            self.numeric.len() + self.blocks.iter().map(|b| b.values.len()).sum::<usize>();
        if computed != self.width {
            return Err(EncoderError::WidthMismatch {
                declared: self.width,
                computed,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_transform::FamilyBin;

    fn derived(cabin: &str, title: &str, family: FamilyBin, embarked: &str) -> DerivedFeatures {
        DerivedFeatures {
            pclass: 3,
            sex: 1,
            age: 30.0,
            cabin_group: cabin.to_string(),
            has_cabin: cabin != "M",
            title: title.to_string(),
            family_bin: family,
            fare_per_person: 7.5,
            embarked: embarked.to_string(),
        }
    }

    fn training() -> Vec<DerivedFeatures> {
        vec![
            derived("M", "Mr", FamilyBin::Alone, "S"),
            derived("ABC", "Mrs", FamilyBin::Middle, "C"),
            derived("DEFG", "Miss", FamilyBin::Alone, "Q"),
            derived("M", "Mr", FamilyBin::Large, "S"),
        ]
    }

    #[test]
    fn test_empty_fit_fails() {
        assert!(matches!(EncoderSchema::fit(&[]), Err(FitError::EmptyTrainingSet)));
    }

    #[test]
    fn test_column_layout() {
        let schema = EncoderSchema::fit(&training()).unwrap();
        assert_eq!(schema.width(), 5 + 3 + 3 + 3 + 3);
        let names = schema.column_names();
        assert_eq!(names.len(), schema.width());
        assert_eq!(&names[..5], &["pclass", "sex", "age", "has_cabin", "fare_per_person"]);
        assert_eq!(names[5], "cabin_group=ABC");
        assert_eq!(names[8], "title=Miss");
        assert_eq!(names[11], "family_size=alone");
        assert_eq!(names[16], "embarked=S");
        assert!(schema.check_layout().is_ok());
    }

    #[test]
    fn test_encode_known_categories() {
        let schema = EncoderSchema::fit(&training()).unwrap();
        let row = schema.encode(&derived("ABC", "Mr", FamilyBin::Middle, "Q"));
        assert_eq!(
            row,
            vec![
                3.0, 1.0, 30.0, 1.0, 7.5, // numeric
                1.0, 0.0, 0.0, // ABC DEFG M
                0.0, 1.0, 0.0, // Miss Mr Mrs
                0.0, 0.0, 1.0, // alone large middle
                0.0, 1.0, 0.0, // C Q S
            ]
        );
    }

    #[test]
    fn test_unseen_category_is_zero_block() {
        let schema = EncoderSchema::fit(&training()).unwrap();
        let row = schema.encode(&derived("X", "Capt", FamilyBin::Alone, "Z"));
        assert_eq!(row.len(), schema.width());
        assert_eq!(&row[5..8], &[0.0, 0.0, 0.0]);
        assert_eq!(&row[8..11], &[0.0, 0.0, 0.0]);
        assert_eq!(&row[14..17], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unsorted_categories_rejected() {
        let mut schema = EncoderSchema::fit(&training()).unwrap();
        schema.blocks[3].values.swap(0, 2);
        assert_eq!(
            schema.check_layout(),
            Err(EncoderError::UnsortedCategories {
                feature: "embarked".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_categories_rejected() {
        let mut schema = EncoderSchema::fit(&training()).unwrap();
        schema.blocks[1].values[1] = "Miss".to_string();
        assert!(matches!(
            schema.check_layout(),
            Err(EncoderError::UnsortedCategories { feature }) if feature == "title"
        ));
    }

    #[test]
    fn test_categories_lookup() {
        let schema = EncoderSchema::fit(&training()).unwrap();
        assert_eq!(
            schema.categories("embarked"),
            Some(&["C".to_string(), "Q".to_string(), "S".to_string()][..])
        );
        assert_eq!(schema.categories("ticket"), None);
    }

    proptest::proptest! {
        #[test]
        fn prop_width_never_changes(cabin in "[A-Z]{0,3}", title in "[A-Za-z]{0,8}", port in "[A-Z]?") {
            let schema = EncoderSchema::fit(&training()).unwrap();
            let row = schema.encode(&derived(&cabin, &title, FamilyBin::Large, &port));
            proptest::prop_assert_eq!(row.len(), schema.width());
        }
    }
}
