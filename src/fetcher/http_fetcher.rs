use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::app::{GitaError, Result};
use crate::fetcher::Fetcher;

pub const DEFAULT_BASE_URL: &str = "https://vedicscriptures.github.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        // Fail early on an unusable base URL rather than on the first request.
        Url::parse(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .default_headers(headers)
            .user_agent("gitapath/0.1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url,
            path.trim_start_matches('/')
        ))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self.endpoint(path, query)?;
        tracing::debug!(%url, "GET");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitaError::network(
                Some(status.as_u16()),
                format!("GET {} returned {}", url, status),
            ));
        }

        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(%url, error = %e, "upstream returned non-JSON body");
            GitaError::MalformedPayload(format!("{}: {}", url.path(), e))
        })
    }
}
