//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::ACCEPT;

use super::{FetchRequest, FetchResponse, HttpFetch};
use crate::error::FetchError;

/// HTTP transport that enforces per-request timeouts and body size caps
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    http: HttpClient,
}

impl ReqwestFetcher {
    /// Create a transport that identifies itself with `user_agent`
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::from)?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        let mut response = self
            .http
            .get(request.url.clone())
            .header(ACCEPT, request.accept)
            .timeout(request.timeout)
            .send()
            .await?;

        let status = response.status();

        // Reject on the declared length before reading anything
        if let Some(len) = response.content_length()
            && len > request.max_bytes as u64
        {
            return Err(FetchError::TooLarge {
                limit: request.max_bytes,
            });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > request.max_bytes {
                return Err(FetchError::TooLarge {
                    limit: request.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body,
        })
    }
}
