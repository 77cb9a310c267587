//! The seam between endpoint methods and HTTP execution.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::options::QueryValues;
use crate::Result;

/// Executes one API request and returns the decoded JSON response.
///
/// Implementations own everything below request shaping: base URL,
/// authentication, retries, TLS. Errors they return reach the caller
/// unchanged. [`HttpTransport`](super::HttpTransport) is the default;
/// tests substitute a recording double.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `method path?query` with an optional JSON `body`.
    ///
    /// `path` is relative to the API root and has no leading slash.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &QueryValues,
        body: Option<&Value>,
    ) -> Result<Value>;
}
