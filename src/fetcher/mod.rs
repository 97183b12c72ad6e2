pub mod http_fetcher;
pub mod parallel;

#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;
use serde_json::Value;

use crate::app::Result;

#[async_trait]
pub trait Fetcher {
    /// GET `path` relative to the upstream base URL and parse the body as JSON.
    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<Value>;
}
