//! reqwest-backed transport

use async_trait::async_trait;

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::Result;

/// Production transport using a shared `reqwest::Client`
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.get(request.full_url());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
