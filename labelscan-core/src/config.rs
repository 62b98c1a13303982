//! Scan configuration from environment variables.

use std::env;

/// Default Open Food Facts base URL.
pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Default number of candidates shown after a name search.
pub const DEFAULT_DISPLAY_LIMIT: usize = 5;

/// Default page size requested from the search endpoint.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Additive keywords flagged in ingredient text. Matching is case-insensitive
/// and reported in this order.
pub const ADDITIVE_KEYWORDS: &[&str] = &["sucralose", "aspartame", "palm oil", "sodium benzoate"];

/// Language tried after the preferred one when selecting ingredient text.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Field subset requested from the lookup-by-code endpoint. Keeps the payload
/// down to the product identity, ingredient-text variants, and country info.
pub const PRODUCT_FIELDS: &[&str] = &[
    "code",
    "product_name",
    "generic_name",
    "ingredients_text",
    "ingredients_text_en",
    "ingredients_text_fr",
    "ingredients_text_de",
    "countries",
    "countries_tags",
];

/// Scan pipeline configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Base URL of the product catalog.
    pub base_url: String,
    /// Candidates shown after ranking a name search.
    pub display_limit: usize,
    /// Page size requested from the search endpoint.
    pub page_size: u32,
    /// Keywords flagged in ingredient text, in report order.
    pub keywords: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
            keywords: ADDITIVE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `LABELSCAN_BASE_URL`: Catalog base URL (default: world.openfoodfacts.org)
    /// - `LABELSCAN_DISPLAY_LIMIT`: Candidates shown after a name search (default: 5)
    /// - `LABELSCAN_PAGE_SIZE`: Search page size (default: 100)
    pub fn from_env() -> Self {
        let base_url = env::var("LABELSCAN_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let display_limit = env::var("LABELSCAN_DISPLAY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DISPLAY_LIMIT);

        let page_size = env::var("LABELSCAN_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            base_url,
            display_limit,
            page_size,
            ..Self::default()
        }
    }
}
