//! HTTP Transport
//!
//! The client talks to the exchange through `HttpTransport` so request
//! building and error normalization can be exercised without a network.

mod http;
mod mock;

pub use http::ReqwestTransport;
pub use mock::MockTransport;

use async_trait::async_trait;

use crate::error::Result;

/// Header carrying the API key on signed requests
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Outgoing GET request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL without query string
    pub url: String,

    /// Already URL-encoded query string, sent verbatim
    pub query: String,

    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: String::new(),
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// URL with the query appended
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, self.query)
        }
    }
}

/// Raw response: status plus body text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport used by the exchange client
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_joins_query() {
        let request = HttpRequest::get("https://api.binance.com/api/v3/time");
        assert_eq!(request.full_url(), "https://api.binance.com/api/v3/time");

        let request = request.with_query("symbol=ADAUSDT");
        assert_eq!(
            request.full_url(),
            "https://api.binance.com/api/v3/time?symbol=ADAUSDT"
        );
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = HttpRequest::get("https://example.test").with_header(API_KEY_HEADER, "key");
        assert_eq!(request.header("x-mbx-apikey"), Some("key"));
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::ok_json("{}").is_success());
        assert!(!HttpResponse::new(400, "{}").is_success());
    }
}
