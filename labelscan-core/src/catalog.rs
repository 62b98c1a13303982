//! Open Food Facts catalog access.
//!
//! Resolves products by exact code and by free-text name search. Responses
//! are navigated as raw JSON and mapped into the typed projections the
//! pipeline works with; the catalog returns far more fields than we ask for
//! or care about.

use std::sync::Arc;

use reqwest::Url;
use serde_json::Value;

use crate::config::{ScanConfig, PRODUCT_FIELDS};
use crate::error::FetchError;
use crate::http::HttpClient;
use crate::types::{Candidate, IngredientTexts, Product};

/// Prefix shared by the whole ingredient-text field family.
const INGREDIENTS_FIELD: &str = "ingredients_text";

/// Client for the product catalog.
pub struct CatalogClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    page_size: u32,
}

impl CatalogClient {
    pub fn new(http: Arc<dyn HttpClient>, config: &ScanConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
        }
    }

    /// Fetch the catalog entry for an exact identifier.
    ///
    /// Returns `Ok(None)` when the catalog has no such product. Requests a
    /// fixed field subset to keep the payload down.
    pub async fn product_by_code(&self, code: &str) -> Result<Option<Product>, FetchError> {
        let url = self.product_url(code)?;
        let json = self.http.fetch_json(&url).await?;
        Ok(json.get("product").and_then(parse_product))
    }

    /// Free-text name search.
    ///
    /// Hits without a code are dropped; everything else maps to a reduced
    /// [`Candidate`] projection.
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Candidate>, FetchError> {
        let url = self.search_url(term)?;
        let json = self.http.fetch_json(&url).await?;

        let candidates = json
            .get("products")
            .and_then(Value::as_array)
            .map(|hits| hits.iter().filter_map(parse_candidate).collect())
            .unwrap_or_default();

        Ok(candidates)
    }

    /// URL for the lookup-by-code endpoint.
    pub fn product_url(&self, code: &str) -> Result<String, FetchError> {
        let mut url = self.endpoint(&format!("/api/v0/product/{}.json", code))?;
        url.query_pairs_mut()
            .append_pair("fields", &PRODUCT_FIELDS.join(","));
        Ok(url.into())
    }

    /// URL for the free-text search endpoint.
    pub fn search_url(&self, term: &str) -> Result<String, FetchError> {
        let mut url = self.endpoint("/cgi/search.pl")?;
        url.query_pairs_mut()
            .append_pair("search_terms", term)
            .append_pair("search_simple", "1")
            .append_pair("action", "process")
            .append_pair("json", "1")
            .append_pair("page_size", &self.page_size.to_string());
        Ok(url.into())
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }
}

/// Parse a `product` object. `None` for the null/absent entry the catalog
/// returns on unknown codes.
fn parse_product(obj: &Value) -> Option<Product> {
    if !obj.is_object() {
        return None;
    }

    Some(Product {
        code: str_field(obj, "code"),
        name: display_name(obj),
        countries: str_field(obj, "countries"),
        countries_tags: string_array(obj, "countries_tags"),
        ingredient_texts: parse_ingredient_texts(obj),
    })
}

/// Parse a raw search hit into a candidate. Hits without a code can't be
/// resolved later and are dropped.
fn parse_candidate(hit: &Value) -> Option<Candidate> {
    let code = hit.get("code").and_then(Value::as_str)?;
    if code.is_empty() {
        return None;
    }

    Some(Candidate {
        code: code.to_string(),
        name: display_name(hit),
        countries: str_field(hit, "countries"),
        countries_tags: string_array(hit, "countries_tags"),
    })
}

/// Collect the ingredient-text field family: the untagged default plus every
/// `ingredients_text_<lang>` variant.
fn parse_ingredient_texts(obj: &Value) -> IngredientTexts {
    let mut texts = IngredientTexts::default();
    let Some(map) = obj.as_object() else {
        return texts;
    };

    for (key, value) in map {
        let Some(text) = value.as_str() else { continue };
        if key == INGREDIENTS_FIELD {
            texts.default = Some(text.to_string());
        } else if let Some(lang) = key.strip_prefix(INGREDIENTS_FIELD) {
            if let Some(lang) = lang.strip_prefix('_') {
                texts.localized.insert(lang.to_string(), text.to_string());
            }
        }
    }

    texts
}

/// `product_name`, falling back to `generic_name`, falling back to empty.
fn display_name(obj: &Value) -> String {
    let name = str_field(obj, "product_name");
    if name.is_empty() {
        str_field(obj, "generic_name")
    } else {
        name
    }
}

fn str_field(obj: &Value, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn string_array(obj: &Value, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockClient;
    use serde_json::json;

    fn catalog(mock: MockClient) -> CatalogClient {
        CatalogClient::new(Arc::new(mock), &ScanConfig::default())
    }

    #[tokio::test]
    async fn test_product_by_code() {
        let probe = catalog(MockClient::new());
        let url = probe.product_url("3017620422003").unwrap();

        let mock = MockClient::new().with_json(
            &url,
            json!({
                "status": 1,
                "product": {
                    "code": "3017620422003",
                    "product_name": "Nutella",
                    "countries": "France, Poland",
                    "countries_tags": ["en:france", "en:poland"],
                    "ingredients_text": "Sugar, Palm Oil, Milk",
                    "ingredients_text_fr": "Sucre, huile de palme, lait"
                }
            }),
        );

        let product = catalog(mock)
            .product_by_code("3017620422003")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.code, "3017620422003");
        assert_eq!(product.name, "Nutella");
        assert_eq!(product.countries_tags, vec!["en:france", "en:poland"]);
        assert_eq!(
            product.ingredient_texts.default.as_deref(),
            Some("Sugar, Palm Oil, Milk")
        );
        assert_eq!(
            product.ingredient_texts.localized.get("fr").map(String::as_str),
            Some("Sucre, huile de palme, lait")
        );
    }

    #[tokio::test]
    async fn test_product_not_found() {
        let empty = catalog(MockClient::new());
        let url = empty.product_url("404").unwrap();

        let mock = MockClient::new().with_json(
            &url,
            json!({ "status": 0, "status_verbose": "product not found", "product": null }),
        );

        let result = catalog(mock).product_by_code("404").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_search_maps_hits() {
        let empty = catalog(MockClient::new());
        let url = empty.search_url("nutella").unwrap();

        let mock = MockClient::new().with_json(
            &url,
            json!({
                "products": [
                    {
                        "code": "1",
                        "product_name": "Nutella",
                        "countries": "France",
                        "countries_tags": ["en:france"]
                    },
                    // no code: dropped
                    { "product_name": "Mystery spread" },
                    // generic_name fallback, missing country info
                    { "code": "2", "generic_name": "Hazelnut spread" }
                ]
            }),
        );

        let candidates = catalog(mock).search_by_name("nutella").await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Nutella");
        assert_eq!(candidates[1].code, "2");
        assert_eq!(candidates[1].name, "Hazelnut spread");
        assert_eq!(candidates[1].countries, "");
        assert!(candidates[1].countries_tags.is_empty());
    }

    #[test]
    fn test_search_url_shape() {
        let catalog = catalog(MockClient::new());
        let url = catalog.search_url("nutella biscuits").unwrap();
        assert!(url.starts_with("https://world.openfoodfacts.org/cgi/search.pl?"));
        assert!(url.contains("search_terms=nutella+biscuits"));
        assert!(url.contains("search_simple=1"));
        assert!(url.contains("action=process"));
        assert!(url.contains("json=1"));
        assert!(url.contains("page_size=100"));
    }

    #[test]
    fn test_product_url_requests_field_subset() {
        let catalog = catalog(MockClient::new());
        let url = catalog.product_url("42").unwrap();
        assert!(url.starts_with("https://world.openfoodfacts.org/api/v0/product/42.json?fields="));
        assert!(url.contains("ingredients_text_de"));
        assert!(url.contains("countries_tags"));
    }
}
