//! HTTP client trait and implementations.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;

use super::rate_limiter::RateLimiter;

/// Trait for HTTP clients, enabling mockability in tests.
///
/// The catalog speaks JSON exclusively, so this is the only fetch shape the
/// pipeline needs.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch a URL and parse the response body as JSON.
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Configuration for RateLimitedClient.
#[derive(Clone)]
pub struct RateLimitedClientBuilder {
    rate_limit_ms: u64,
    timeout: Duration,
    user_agent: String,
}

impl Default for RateLimitedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimitedClientBuilder {
    pub fn new() -> Self {
        Self {
            rate_limit_ms: 200,
            timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (compatible; Labelscan/1.0)".to_string(),
        }
    }

    /// Set the rate limit delay in milliseconds. 0 disables rate limiting.
    pub fn rate_limit_ms(mut self, ms: u64) -> Self {
        self.rate_limit_ms = ms;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Build the RateLimitedClient.
    pub fn build(self) -> Result<RateLimitedClient, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(RateLimitedClient {
            inner: Arc::new(inner),
            rate_limiter: RateLimiter::new(Duration::from_millis(self.rate_limit_ms)),
        })
    }
}

/// Production HTTP client with per-host rate limiting.
pub struct RateLimitedClient {
    /// Shared reqwest client for connection pooling.
    inner: Arc<reqwest::Client>,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    /// Create a new RateLimitedClient with default configuration.
    pub fn new() -> Result<Self, reqwest::Error> {
        RateLimitedClientBuilder::new().build()
    }

    /// Get a builder for custom configuration.
    pub fn builder() -> RateLimitedClientBuilder {
        RateLimitedClientBuilder::new()
    }
}

#[async_trait]
impl HttpClient for RateLimitedClient {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        if let Some(host) = parsed.host_str() {
            self.rate_limiter.wait(host).await;
        }

        tracing::debug!(url, "network: fetching");
        let response = self.inner.get(parsed).send().await?;

        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "network: request failed");
            return Err(FetchError::RequestFailed(
                response.error_for_status().unwrap_err(),
            ));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::InvalidJson(e.to_string()))
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    Json(Value),
    Error(String),
}

/// Mock HTTP client for testing.
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
}

impl MockClient {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    /// Add a response for a URL.
    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Add a JSON response for a URL.
    pub fn with_json(self, url: &str, json: Value) -> Self {
        self.with_response(url, MockResponse::Json(json))
    }

    /// Add an error response for a URL.
    pub fn with_error(self, url: &str, error: &str) -> Self {
        self.with_response(url, MockResponse::Error(error.to_string()))
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        match self.responses.get(url) {
            Some(MockResponse::Json(json)) => Ok(json.clone()),
            Some(MockResponse::Error(e)) => Err(FetchError::InvalidUrl(e.clone())),
            None => Err(FetchError::InvalidUrl(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}
