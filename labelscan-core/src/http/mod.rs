//! HTTP plumbing for catalog access.

mod client;
mod rate_limiter;

pub use client::{
    HttpClient, MockClient, MockResponse, RateLimitedClient, RateLimitedClientBuilder,
};
pub use rate_limiter::RateLimiter;
