//! Honorific extraction and synonym normalization

use regex::Regex;
use std::sync::LazyLock;

/// Catch-all title for rare or unparseable honorifics
pub const RARE_TITLE: &str = "Rare";

/// Title whose training frequency sets the rare-title threshold
pub const REFERENCE_TITLE: &str = "Master";

/// Fixed synonym table applied before rare-title folding
const SYNONYMS: &[(&str, &str)] = &[
    ("Ms", "Miss"),
    ("Mlle", "Miss"),
    ("Mme", "Mrs"),
    ("Lady", "Mrs"),
    ("Don", "Mr"),
    ("Dona", "Mrs"),
];

/// Extract the raw honorific: a run of letters preceded by a space and followed by a period
pub fn extract_title(name: &str) -> Option<&str> {
    static TITLE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r" ([A-Za-z]+)\.").expect("valid regex"));

    TITLE_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Map a raw honorific through the synonym table
pub fn normalize_title(raw: &str) -> &str {
    SYNONYMS
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| *to)
        .unwrap_or(raw)
}

/// Extract and normalize in one step; `None` when the name has no honorific
pub fn canonical_title(name: &str) -> Option<&str> {
    extract_title(name).map(normalize_title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_common_title() {
        assert_eq!(extract_title("Olsen, Mr. Karl Siegwart"), Some("Mr"));
        assert_eq!(extract_title("Cumings, Mrs. John Bradley (Florence Briggs Thayer)"), Some("Mrs"));
    }

    #[test]
    fn test_first_match_wins() {
        // "St." later in the string must not shadow the honorific
        assert_eq!(extract_title("Rothes, the Countess. of (Lucy) St. Clair"), Some("Countess"));
    }

    #[test]
    fn test_unparseable_name() {
        assert_eq!(extract_title("NoTitleHere"), None);
        assert_eq!(extract_title(""), None);
        assert_eq!(canonical_title("Smith John"), None);
    }

    #[test]
    fn test_synonym_table() {
        assert_eq!(normalize_title("Ms"), "Miss");
        assert_eq!(normalize_title("Mlle"), "Miss");
        assert_eq!(normalize_title("Mme"), "Mrs");
        assert_eq!(normalize_title("Lady"), "Mrs");
        assert_eq!(normalize_title("Don"), "Mr");
        assert_eq!(normalize_title("Dona"), "Mrs");
        assert_eq!(normalize_title("Dr"), "Dr");
    }

    #[test]
    fn test_canonical_title() {
        assert_eq!(canonical_title("Aubart, Mme. Leontine Pauline"), Some("Mrs"));
    }
}
