//! Access to the optimization API
//!
//! The API is an external collaborator: it owns resources, computes the
//! recommendations and aggregates the summary. This module only consumes
//! its three read endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::models::{Recommendation, Resource, Summary};

/// Default base URL of the optimization API
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const RESOURCES_PATH: &str = "resources";
pub const RECOMMENDATIONS_PATH: &str = "recommendations";
pub const SUMMARY_PATH: &str = "summary";
pub const HEALTH_PATH: &str = "health";

/// Failure of a single retrieval
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("malformed payload from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only contract of the optimization API
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_resources(&self) -> Result<Vec<Resource>, FetchError>;

    async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>, FetchError>;

    async fn fetch_summary(&self) -> Result<Summary, FetchError>;

    /// Liveness probe. Not part of a dashboard load.
    async fn health(&self) -> Result<HealthStatus, FetchError>;

    /// Where the data comes from, for user-facing messages
    fn describe(&self) -> String;
}

/// Response of the API's health endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Configuration for the HTTP data source
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://127.0.0.1:8000")
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

/// HTTP implementation of [`DataSource`]
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: Client,
    base_url: Url,
}

impl HttpDataSource {
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| FetchError::Transport {
            endpoint: config.base_url.clone(),
            source,
        })?;

        // Without a trailing slash `join` would replace the last path segment
        let mut raw = config.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|source| FetchError::InvalidUrl {
            url: config.base_url.clone(),
            source,
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|source| FetchError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })?;
        let endpoint = url.to_string();
        debug!(endpoint = %endpoint, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                endpoint,
                status,
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode { endpoint, source })
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_resources(&self) -> Result<Vec<Resource>, FetchError> {
        self.get(RESOURCES_PATH).await
    }

    async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>, FetchError> {
        self.get(RECOMMENDATIONS_PATH).await
    }

    async fn fetch_summary(&self) -> Result<Summary, FetchError> {
        self.get(SUMMARY_PATH).await
    }

    async fn health(&self) -> Result<HealthStatus, FetchError> {
        self.get(HEALTH_PATH).await
    }

    fn describe(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}
