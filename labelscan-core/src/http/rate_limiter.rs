//! Per-host rate limiting for catalog requests.

use dashmap::DashMap;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Enforces a minimum delay between requests to the same host.
///
/// The catalog is a shared public resource; one limiter instance is held per
/// client so concurrent lookups through that client are spaced out.
pub struct RateLimiter {
    min_delay: Duration,
    last_request: DashMap<String, Instant>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_request: DashMap::new(),
        }
    }

    /// Sleep until at least `min_delay` has passed since the previous request
    /// to `host`, then record this request.
    pub async fn wait(&self, host: &str) {
        if self.min_delay.is_zero() {
            return;
        }

        let remaining = self
            .last_request
            .get(host)
            .and_then(|last| self.min_delay.checked_sub(last.elapsed()));

        if let Some(remaining) = remaining {
            sleep(remaining).await;
        }

        self.last_request.insert(host.to_string(), Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        // 200ms between requests to the same host
        Self::new(Duration::from_millis(200))
    }
}
