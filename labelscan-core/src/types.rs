//! Catalog product types.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Interface languages offered by the scanner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    French,
    German,
}

impl Language {
    /// Two-letter code used by the catalog's localized fields.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
            Language::German => "de",
        }
    }

    /// Three-letter code used by the tesseract engine.
    pub fn tesseract_code(&self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::French => "fra",
            Language::German => "deu",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "fr" | "fra" | "french" => Ok(Language::French),
            "de" | "deu" | "german" => Ok(Language::German),
            other => Err(format!("Unknown language: {}", other)),
        }
    }
}

/// The family of ingredient-text fields carried by a product.
///
/// `localized` is keyed by language code. A BTreeMap keeps the last-resort
/// fallback scan deterministic (lexicographic over the language suffix)
/// instead of depending on representation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientTexts {
    /// The untagged `ingredients_text` field.
    pub default: Option<String>,
    /// Localized variants, language code -> text.
    pub localized: BTreeMap<String, String>,
}

impl IngredientTexts {
    /// True if no variant holds any text at all.
    pub fn is_empty(&self) -> bool {
        self.default.as_deref().map_or(true, str::is_empty)
            && self.localized.values().all(|t| t.is_empty())
    }
}

/// A catalog product resolved by exact code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog identifier (barcode).
    pub code: String,
    pub name: String,
    /// Free-text country list, e.g. "France, Poland".
    pub countries: String,
    /// Normalized country tags, e.g. "en:france".
    pub countries_tags: Vec<String>,
    pub ingredient_texts: IngredientTexts,
}

/// A reduced product projection from a name search, awaiting user selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub code: String,
    pub name: String,
    pub countries: String,
    pub countries_tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("French".parse::<Language>().unwrap(), Language::French);
        assert_eq!(" DE ".parse::<Language>().unwrap(), Language::German);
        assert!("xx".parse::<Language>().is_err());
    }

    #[test]
    fn test_ingredient_texts_empty() {
        assert!(IngredientTexts::default().is_empty());

        let texts = IngredientTexts {
            default: Some(String::new()),
            localized: BTreeMap::from([("fr".to_string(), String::new())]),
        };
        assert!(texts.is_empty());

        let texts = IngredientTexts {
            default: None,
            localized: BTreeMap::from([("fr".to_string(), "sucre".to_string())]),
        };
        assert!(!texts.is_empty());
    }
}
