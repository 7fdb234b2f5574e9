//! Calls against a running `chaos-monkey-server`

use domain::StatsReport;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::endpoint_url;

/// Remote call errors
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server answered HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Body of `POST /chaos/stats/reset`
#[derive(Debug, Clone, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub stats: StatsReport,
}

/// Client for the server's control endpoints
#[derive(Debug, Clone)]
pub struct ChaosClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChaosClient {
    /// Create a client for `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Server base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /chaos/stats`
    pub async fn stats(&self) -> Result<StatsReport, RemoteError> {
        let resp = self
            .client
            .get(endpoint_url(&self.base_url, "/chaos/stats"))
            .send()
            .await?;
        Ok(ensure_success(resp)?.json::<StatsReport>().await?)
    }

    /// `POST /chaos/stats/reset`
    pub async fn reset_stats(&self) -> Result<ResetResponse, RemoteError> {
        let resp = self
            .client
            .post(endpoint_url(&self.base_url, "/chaos/stats/reset"))
            .send()
            .await?;
        Ok(ensure_success(resp)?.json::<ResetResponse>().await?)
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<serde_json::Value, RemoteError> {
        let resp = self
            .client
            .get(endpoint_url(&self.base_url, "/health"))
            .send()
            .await?;
        Ok(ensure_success(resp)?.json::<serde_json::Value>().await?)
    }
}

fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        Err(RemoteError::Status(resp.status()))
    }
}
