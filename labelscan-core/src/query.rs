//! Query classification.
//!
//! A trimmed all-digit input is a barcode; anything else is a name search.
//! A name search may carry an inline country hint ("nutella in Poland"),
//! which takes precedence over a separately supplied country field.

use std::sync::LazyLock;

use regex::Regex;

/// Trailing "in <country>" hint on a name query (case-insensitive).
static COUNTRY_HINT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+in\s+([\w\s-]+)$").expect("Invalid country hint regex"));

/// A classified user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Exact catalog identifier lookup.
    Barcode(String),
    /// Free-text name search, optionally biased toward a country.
    Name {
        term: String,
        country_hint: Option<String>,
    },
}

impl Query {
    /// Classify a raw input string, merging in an optional country-field
    /// value. An inline hint overrides the field value (last one computed
    /// wins).
    pub fn classify(raw: &str, country_field: Option<&str>) -> Query {
        let trimmed = raw.trim();

        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Query::Barcode(trimmed.to_string());
        }

        let mut country_hint = country_field
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let term = match COUNTRY_HINT_REGEX.captures(trimmed) {
            Some(caps) => {
                country_hint = Some(caps[1].trim().to_string());
                trimmed[..caps.get(0).expect("capture 0 always present").start()]
                    .trim()
                    .to_string()
            }
            None => trimmed.to_string(),
        };

        Query::Name { term, country_hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_digits_is_barcode() {
        assert_eq!(
            Query::classify("3017620422003", None),
            Query::Barcode("3017620422003".to_string())
        );
        assert_eq!(Query::classify("  42  ", None), Query::Barcode("42".to_string()));
    }

    #[test]
    fn test_mixed_input_is_name() {
        assert_eq!(
            Query::classify("nutella 750g", None),
            Query::Name {
                term: "nutella 750g".to_string(),
                country_hint: None,
            }
        );
    }

    #[test]
    fn test_inline_country_hint() {
        assert_eq!(
            Query::classify("nutella in Poland", None),
            Query::Name {
                term: "nutella".to_string(),
                country_hint: Some("Poland".to_string()),
            }
        );
    }

    #[test]
    fn test_inline_hint_is_case_insensitive() {
        assert_eq!(
            Query::classify("nutella IN new zealand", None),
            Query::Name {
                term: "nutella".to_string(),
                country_hint: Some("new zealand".to_string()),
            }
        );
    }

    #[test]
    fn test_inline_hint_overrides_country_field() {
        assert_eq!(
            Query::classify("nutella in Poland", Some("France")),
            Query::Name {
                term: "nutella".to_string(),
                country_hint: Some("Poland".to_string()),
            }
        );
    }

    #[test]
    fn test_country_field_used_without_inline_hint() {
        assert_eq!(
            Query::classify("nutella", Some(" France ")),
            Query::Name {
                term: "nutella".to_string(),
                country_hint: Some("France".to_string()),
            }
        );
    }

    #[test]
    fn test_barcode_ignores_country_field() {
        assert_eq!(
            Query::classify("123456", Some("France")),
            Query::Barcode("123456".to_string())
        );
    }

    #[test]
    fn test_hint_captures_everything_after_first_in() {
        // The hint pattern anchors at the end but matches leftmost-first, so
        // every word after the first standalone "in" lands in the hint.
        assert_eq!(
            Query::classify("made in italy pasta", None),
            Query::Name {
                term: "made".to_string(),
                country_hint: Some("italy pasta".to_string()),
            }
        );
    }

    #[test]
    fn test_empty_input_is_empty_name() {
        assert_eq!(
            Query::classify("   ", None),
            Query::Name {
                term: String::new(),
                country_hint: None,
            }
        );
    }
}
