//! Scripted transport for testing
//!
//! Responses are registered per URL and every request is recorded, so tests
//! can assert exactly which calls were (or were not) made.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{FetchRequest, FetchResponse, HttpFetch};
use crate::error::FetchError;

/// Mock transport for testing.
///
/// Each URL holds a queue of replies. Replies are consumed in order, and the
/// last one is repeated once the queue is down to a single entry.
///
/// # Example
/// ```ignore
/// let mock = MockFetcher::new()
///     .with_body("https://example.com/a.ics", 200, ics_text);
///
/// let events = CalendarAggregator::new(Arc::new(mock), settings).fetch_events(sources).await;
/// ```
#[derive(Default)]
pub struct MockFetcher {
    replies: Mutex<HashMap<String, VecDeque<Result<FetchResponse, FetchError>>>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body
    pub fn with_body(self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push(url, Ok(FetchResponse::new(status, body)));
        self
    }

    /// Queue a transport failure
    pub fn with_error(self, url: &str, error: FetchError) -> Self {
        self.push(url, Err(error));
        self
    }

    /// Queue a reply on an existing mock (usable after it has been shared)
    pub fn push(&self, url: &str, reply: Result<FetchResponse, FetchError>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.entry(url.to_string()).or_default().push_back(reply);
        }
    }

    /// All requests made so far, in order
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of requests made for `url`
    pub fn call_count(&self, url: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.url.as_str() == url)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests().len()
    }
}

#[async_trait]
impl HttpFetch for MockFetcher {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let mut replies = self
            .replies
            .lock()
            .map_err(|_| FetchError::Other("mock poisoned".to_string()))?;

        let queue = replies
            .get_mut(request.url.as_str())
            .ok_or_else(|| FetchError::Other(format!("no mock reply for {}", request.url)))?;

        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        let reply = reply
            .ok_or_else(|| FetchError::Other(format!("no mock reply for {}", request.url)))?;

        if let Ok(response) = &reply
            && response.body.len() > request.max_bytes
        {
            return Err(FetchError::TooLarge {
                limit: request.max_bytes,
            });
        }

        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    fn request(url: &str) -> FetchRequest {
        FetchRequest::new(
            Url::parse(url).unwrap(),
            "application/json",
            Duration::from_secs(1),
            64,
        )
    }

    #[tokio::test]
    async fn test_mock_replays_last_reply() {
        let mock = MockFetcher::new().with_body("https://example.com/a", 200, "one");

        let first = mock.get(&request("https://example.com/a")).await.unwrap();
        let second = mock.get(&request("https://example.com/a")).await.unwrap();

        assert_eq!(first.body, b"one".to_vec());
        assert_eq!(second.body, b"one".to_vec());
        assert_eq!(mock.call_count("https://example.com/a"), 2);
    }

    #[tokio::test]
    async fn test_mock_consumes_queue_in_order() {
        let mock = MockFetcher::new()
            .with_body("https://example.com/a", 404, "")
            .with_body("https://example.com/a", 200, "ok");

        let first = mock.get(&request("https://example.com/a")).await.unwrap();
        let second = mock.get(&request("https://example.com/a")).await.unwrap();

        assert_eq!(first.status, 404);
        assert_eq!(second.status, 200);
    }

    #[tokio::test]
    async fn test_mock_unknown_url_errors() {
        let mock = MockFetcher::new();
        let result = mock.get(&request("https://example.com/missing")).await;
        assert!(result.is_err());
        assert_eq!(mock.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_enforces_size_cap() {
        let mock = MockFetcher::new().with_body("https://example.com/big", 200, vec![b'x'; 65]);
        let result = mock.get(&request("https://example.com/big")).await;
        assert_eq!(result, Err(FetchError::TooLarge { limit: 64 }));
    }
}
