//! HTTP transport seam
//!
//! The weather client and calendar aggregator fetch through [`HttpFetch`]
//! rather than holding a `reqwest::Client` directly. Production code uses
//! [`ReqwestFetcher`]; tests script responses with `MockFetcher`.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;

#[cfg(test)]
pub mod mock;
pub mod reqwest_fetcher;

#[cfg(test)]
pub use mock::MockFetcher;
pub use reqwest_fetcher::ReqwestFetcher;

/// Fixed contact string sent with every request
pub const USER_AGENT: &str = "(myweatherapp.com, contact@myweatherapp.com)";

/// A bounded GET request
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: Url,
    /// Value for the `Accept` header
    pub accept: &'static str,
    pub timeout: Duration,
    /// Bodies larger than this fail with [`FetchError::TooLarge`]
    pub max_bytes: usize,
}

impl FetchRequest {
    pub fn new(url: Url, accept: &'static str, timeout: Duration, max_bytes: usize) -> Self {
        Self {
            url,
            accept,
            timeout,
            max_bytes,
        }
    }
}

/// A fully buffered response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    /// Reason phrase for the status, if one is known
    pub reason: Option<String>,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Reason phrase, falling back to the numeric code
    pub fn status_text(&self) -> String {
        self.reason
            .clone()
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }
}

/// Async GET transport
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_response_reason_from_status() {
        let response = FetchResponse::new(404, "");
        assert_eq!(response.status_text(), "Not Found");
        assert!(!response.is_success());
    }

    #[test]
    fn test_fetch_response_unknown_status_text() {
        let response = FetchResponse {
            status: 599,
            reason: None,
            body: vec![],
        };
        assert_eq!(response.status_text(), "HTTP 599");
    }

    #[test]
    fn test_fetch_response_success_range() {
        assert!(FetchResponse::new(200, "ok").is_success());
        assert!(FetchResponse::new(204, "").is_success());
        assert!(!FetchResponse::new(301, "").is_success());
    }
}
