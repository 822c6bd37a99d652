//! HTTP transport seam for the catalog providers.
//!
//! Providers talk to their upstreams through the [`Fetch`] trait rather than
//! calling `reqwest` directly, so the retry policy can be exercised against a
//! fake transport and provider tests can run without a network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

/// Per-request timeout. Shorter than the cumulative retry schedule so a dead
/// upstream cannot stall an interaction indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Transport-level failure, not yet attributed to a provider.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout, or upstream 5xx.
    #[error("{0}")]
    Network(String),

    /// Upstream rejected the request with HTTP 401.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The body was not valid JSON.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Minimal async GET-JSON transport.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Execute a GET request and decode the body as JSON.
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError>;
}

/// Production transport backed by a shared `reqwest` client.
pub struct HttpFetch {
    client: reqwest::Client,
}

impl HttpFetch {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });
        Self { client }
    }
}

impl Default for HttpFetch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for HttpFetch {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }
        if status.is_server_error() {
            return Err(FetchError::Network(format!("upstream returned {status}")));
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
