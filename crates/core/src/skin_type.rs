//! Skin-type tag normalization.
//!
//! Skin types arrive from two places: free-form catalog authoring (a
//! comma-separated text field or a multi-select list) and shopper filter
//! selections. Both go through [`normalize`] so stored and queried values are
//! comparable, and catalog documents additionally go through
//! [`validate_and_normalize`] so only the canonical tags are ever stored.
//!
//! Unknown tags are dropped without an error.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A canonical skin-type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Sensitive,
}

impl SkinType {
    /// Every canonical tag, in display order.
    pub const ALL: [Self; 4] = [Self::Oily, Self::Dry, Self::Combination, Self::Sensitive];

    /// The normalized tag string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oily => "oily",
            Self::Dry => "dry",
            Self::Combination => "combination",
            Self::Sensitive => "sensitive",
        }
    }

    /// Title-cased label for chips and facet lists.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Oily => "Oily",
            Self::Dry => "Dry",
            Self::Combination => "Combination",
            Self::Sensitive => "Sensitive",
        }
    }

    /// Look up a canonical tag from an already-normalized string.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for SkinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw skin-type input: one comma-separated string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkinTypeInput<'a> {
    /// A single comma-separated string, e.g. `"Oily, Combination"`.
    Text(&'a str),
    /// A list of entries. Entries may themselves contain commas.
    List(Vec<&'a str>),
}

impl<'a> SkinTypeInput<'a> {
    fn entries(&self) -> impl Iterator<Item = &'a str> + '_ {
        let entries: Box<dyn Iterator<Item = &'a str> + '_> = match self {
            Self::Text(text) => Box::new(std::iter::once(*text)),
            Self::List(list) => Box::new(list.iter().copied()),
        };
        entries.flat_map(|entry| entry.split(','))
    }
}

impl<'a> From<&'a str> for SkinTypeInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for SkinTypeInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a, 'b: 'a> From<&'a [&'b str]> for SkinTypeInput<'a> {
    fn from(list: &'a [&'b str]) -> Self {
        Self::List(list.to_vec())
    }
}

impl<'a, 'b: 'a, const N: usize> From<&'a [&'b str; N]> for SkinTypeInput<'a> {
    fn from(list: &'a [&'b str; N]) -> Self {
        Self::List(list.to_vec())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for SkinTypeInput<'a> {
    fn from(list: [&'a str; N]) -> Self {
        Self::List(list.to_vec())
    }
}

impl<'a> From<&'a [String]> for SkinTypeInput<'a> {
    fn from(list: &'a [String]) -> Self {
        Self::List(list.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for SkinTypeInput<'a> {
    fn from(list: &'a Vec<String>) -> Self {
        Self::from(list.as_slice())
    }
}

/// Lowercase, trim, split on commas, drop empty entries and deduplicate.
///
/// ```
/// use dewdrop_core::skin_type::normalize;
///
/// let tags = normalize(" Oily,,DRY , oily ");
/// assert_eq!(tags.into_iter().collect::<Vec<_>>(), ["dry", "oily"]);
/// ```
pub fn normalize<'a>(input: impl Into<SkinTypeInput<'a>>) -> BTreeSet<String> {
    let input = input.into();
    input
        .entries()
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// [`normalize`], then keep only canonical tags.
///
/// ```
/// use dewdrop_core::skin_type::{SkinType, validate_and_normalize};
///
/// let tags = validate_and_normalize(["Oily, Dry", "UNKNOWN", "sensitive", "oily"]);
/// assert_eq!(
///     tags.into_iter().collect::<Vec<_>>(),
///     [SkinType::Oily, SkinType::Dry, SkinType::Sensitive]
/// );
/// ```
pub fn validate_and_normalize<'a>(input: impl Into<SkinTypeInput<'a>>) -> BTreeSet<SkinType> {
    let normalized = normalize(input);
    let canonical: BTreeSet<SkinType> = normalized.iter().filter_map(|t| SkinType::parse(t)).collect();
    if canonical.len() < normalized.len() {
        tracing::debug!(
            dropped = normalized.len() - canonical.len(),
            "Dropped unrecognized skin-type tags"
        );
    }
    canonical
}

/// Owned form of [`SkinTypeInput`] as it appears in stored documents.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSkinTypes {
    Text(String),
    List(Vec<String>),
}

/// Deserialize a skin-type field that may be a string or a list, keeping only
/// canonical tags.
pub(crate) fn deserialize_canonical<'de, D>(deserializer: D) -> Result<BTreeSet<SkinType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawSkinTypes>::deserialize(deserializer)?;
    Ok(match raw {
        None => BTreeSet::new(),
        Some(RawSkinTypes::Text(text)) => validate_and_normalize(&text),
        Some(RawSkinTypes::List(list)) => validate_and_normalize(&list),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| (*t).to_owned()).collect()
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize("Oily, Dry"), set(&["oily", "dry"]));
    }

    #[test]
    fn test_normalize_drops_empty_entries() {
        assert_eq!(normalize(" , ,oily,"), set(&["oily"]));
        assert!(normalize("").is_empty());
        assert!(normalize("   ").is_empty());
    }

    #[test]
    fn test_normalize_list_splits_entries() {
        let list = vec!["Combination, sensitive".to_owned(), "  DRY ".to_owned()];
        assert_eq!(
            normalize(&list),
            set(&["combination", "sensitive", "dry"])
        );
    }

    #[test]
    fn test_normalize_keeps_unknown_tags() {
        assert_eq!(normalize("Mature"), set(&["mature"]));
    }

    #[test]
    fn test_validate_and_normalize_mixed_input() {
        let tags = validate_and_normalize(&["Oily, Dry", "UNKNOWN", "sensitive", "oily"]);
        let expected: BTreeSet<SkinType> = [SkinType::Oily, SkinType::Dry, SkinType::Sensitive]
            .into_iter()
            .collect();
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_validate_and_normalize_all_unknown() {
        assert!(validate_and_normalize("normal, acne-prone").is_empty());
    }

    #[test]
    fn test_parse_requires_normalized_input() {
        assert_eq!(SkinType::parse("dry"), Some(SkinType::Dry));
        assert_eq!(SkinType::parse("Dry"), None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = SkinType::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["Oily", "Dry", "Combination", "Sensitive"]);
    }
}
