use super::messages::{QueryRequest, QueryResponse};
use anyhow::{Context, Result};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Path of the query endpoint, relative to the service base URL
pub const QUERY_PATH: &str = "/query/";

/// Ways a round trip to the decision service can fail
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    Request(#[source] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The remote decision-making service
#[async_trait::async_trait]
pub trait DecisionService: Send + Sync {
    /// Send one query and return the raw response text
    async fn query(&self, request: &QueryRequest) -> Result<String, BackendError>;

    /// Service name for logging
    fn name(&self) -> &str;
}

/// Decision service reached over HTTP with a single JSON round trip
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    /// Build a client for the service at `base_url`. Without a timeout the
    /// transport default applies.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), QUERY_PATH);
        info!("Decision service endpoint: {}", endpoint);

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl DecisionService for HttpBackend {
    async fn query(&self, request: &QueryRequest) -> Result<String, BackendError> {
        info!(
            "Sending query for session {} (pillar={}, chars={})",
            request.session_id,
            request.pillar,
            request.input_text.chars().count()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(BackendError::Request)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Decision service returned {}", status);
            return Err(BackendError::Status(status.as_u16()));
        }

        let body = response
            .json::<QueryResponse>()
            .await
            .map_err(BackendError::Decode)?;

        info!("Received response ({} chars)", body.response.chars().count());

        Ok(body.response)
    }

    fn name(&self) -> &str {
        "http"
    }
}
