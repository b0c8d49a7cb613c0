//! Mock Transport
//!
//! For testing. Replays scripted responses in order and records every
//! request it receives.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::Result;

/// Scripted transport
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with a fixed script of responses
    pub fn with_responses(responses: impl IntoIterator<Item = HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    /// Requests seen so far, oldest first
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().await.push(request);

        // Running past the script looks like an unavailable server
        let response = self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| HttpResponse::new(503, "mock transport: no scripted response"));

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let transport = MockTransport::with_responses([
            HttpResponse::ok_json("1"),
            HttpResponse::ok_json("2"),
        ]);

        let first = transport.get(HttpRequest::get("https://a.test")).await.unwrap();
        let second = transport.get(HttpRequest::get("https://b.test")).await.unwrap();
        let exhausted = transport.get(HttpRequest::get("https://c.test")).await.unwrap();

        assert_eq!(first.body, "1");
        assert_eq!(second.body, "2");
        assert_eq!(exhausted.status, 503);

        let urls: Vec<_> = transport.requests().await.into_iter().map(|r| r.url).collect();
        assert_eq!(urls, ["https://a.test", "https://b.test", "https://c.test"]);
    }
}
