//! Ingredient text selection across localized field variants.

use crate::config::FALLBACK_LANGUAGE;
use crate::types::{Language, Product};

/// Select the ingredient text to display for a product.
///
/// Priority: the preferred language's field, then English, then the untagged
/// default, then the first non-empty localized field in lexicographic
/// language order. Each step only applies if its field is non-empty.
/// `None` means the product carries no ingredient data at all.
pub fn select_ingredient_text(product: &Product, preferred: Language) -> Option<&str> {
    let texts = &product.ingredient_texts;

    non_empty(texts.localized.get(preferred.code()).map(String::as_str))
        .or_else(|| non_empty(texts.localized.get(FALLBACK_LANGUAGE).map(String::as_str)))
        .or_else(|| non_empty(texts.default.as_deref()))
        .or_else(|| {
            // Last resort: any localized variant. BTreeMap iteration makes
            // this deterministic (lexicographic over the language suffix).
            texts.localized.values().map(String::as_str).find(|t| !t.is_empty())
        })
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IngredientTexts;
    use std::collections::BTreeMap;

    fn product(default: Option<&str>, localized: &[(&str, &str)]) -> Product {
        Product {
            code: "1".to_string(),
            name: "test".to_string(),
            countries: String::new(),
            countries_tags: vec![],
            ingredient_texts: IngredientTexts {
                default: default.map(str::to_string),
                localized: localized
                    .iter()
                    .map(|(lang, text)| (lang.to_string(), text.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            },
        }
    }

    #[test]
    fn test_preferred_language_wins() {
        let p = product(Some("default"), &[("de", "Zucker"), ("en", "sugar")]);
        assert_eq!(select_ingredient_text(&p, Language::German), Some("Zucker"));
    }

    #[test]
    fn test_falls_back_to_english() {
        let p = product(Some("default"), &[("en", "sugar"), ("fr", "sucre")]);
        assert_eq!(select_ingredient_text(&p, Language::German), Some("sugar"));
    }

    #[test]
    fn test_empty_preferred_field_is_skipped() {
        let p = product(None, &[("de", ""), ("en", "sugar")]);
        assert_eq!(select_ingredient_text(&p, Language::German), Some("sugar"));
    }

    #[test]
    fn test_falls_back_to_untagged_default() {
        let p = product(Some("Sugar, Palm Oil"), &[]);
        assert_eq!(
            select_ingredient_text(&p, Language::French),
            Some("Sugar, Palm Oil")
        );
    }

    #[test]
    fn test_lexicographic_last_resort() {
        // neither preferred (de) nor en nor default: lowest language code wins
        let p = product(None, &[("pl", "cukier"), ("it", "zucchero")]);
        assert_eq!(select_ingredient_text(&p, Language::German), Some("zucchero"));
    }

    #[test]
    fn test_no_ingredient_data() {
        let p = product(None, &[]);
        assert_eq!(select_ingredient_text(&p, Language::English), None);

        let p = product(Some(""), &[("fr", "")]);
        assert_eq!(select_ingredient_text(&p, Language::English), None);
    }
}
