//! HTTP client for the query endpoint.

use std::time::Duration;

use advocate_core::{Advocate, AdvocateList, ErrorBody};
use async_trait::async_trait;
use reqwest::Client;

use crate::error::FetchError;
use crate::source::AdvocateSource;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Server-side filtering: every fetch is a `GET /api/advocates` request.
#[derive(Debug, Clone)]
pub struct HttpAdvocateClient {
    client: Client,
    base_url: String,
}

impl HttpAdvocateClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn advocates_url(&self) -> String {
        format!("{}/api/advocates", self.base_url)
    }
}

#[async_trait]
impl AdvocateSource for HttpAdvocateClient {
    async fn fetch(&self, query: Option<&str>) -> Result<Vec<Advocate>, FetchError> {
        let mut request = self.client.get(self.advocates_url());
        if let Some(term) = query {
            request = request.query(&[("search", term)]);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                });
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: AdvocateList = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(body.data)
    }
}
