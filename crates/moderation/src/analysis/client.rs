//! Classification service client
//!
//! Uses synchronous HTTP (ureq) so the client stays executor-agnostic;
//! [`analyze_async`] moves the blocking call onto Tokio's blocking pool.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use crate::models::AnalysisResult;

/// Failure of a single analysis call. Carries no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisRequestError {
    #[error("Analysis request failed: {0}")]
    Transport(String),

    #[error("Analysis service returned HTTP {0}")]
    Status(u16),

    #[error("Malformed analysis response: {0}")]
    MalformedBody(String),
}

/// Something that can classify a message body.
///
/// Implementations issue a fresh request on every call; no caching, retry
/// or timeout happens at this layer.
pub trait AnalysisClient: Send + Sync {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisRequestError>;
}

/// Request body for `POST /analyze`
#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// HTTP client for the classification service
pub struct HttpAnalysisClient {
    agent: ureq::Agent,
    endpoint: Url,
}

impl HttpAnalysisClient {
    /// Endpoint used when nothing is configured
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:5000/analyze";

    /// Create a client posting to the full `endpoint` URL
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid analysis endpoint: {}", endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("Analysis endpoint must be http or https: {}", endpoint);
        }

        Ok(Self {
            agent: ureq::Agent::new_with_defaults(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl AnalysisClient for HttpAnalysisClient {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisRequestError> {
        debug!("POST {} ({} bytes)", self.endpoint, text.len());

        let response = self
            .agent
            .post(self.endpoint.as_str())
            .send_json(&AnalyzeRequest { text });

        let mut response = match response {
            Ok(resp) => resp,
            Err(ureq::Error::StatusCode(code)) => return Err(AnalysisRequestError::Status(code)),
            Err(e) => return Err(AnalysisRequestError::Transport(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisRequestError::Status(status.as_u16()));
        }

        response
            .body_mut()
            .read_json::<AnalysisResult>()
            .map_err(|e| AnalysisRequestError::MalformedBody(e.to_string()))
    }
}

/// Run `client.analyze(text)` without blocking the calling task
pub async fn analyze_async(
    client: Arc<dyn AnalysisClient>,
    text: String,
) -> Result<AnalysisResult, AnalysisRequestError> {
    tokio::task::spawn_blocking(move || client.analyze(&text))
        .await
        .map_err(|e| AnalysisRequestError::Transport(format!("analysis task failed: {}", e)))?
}
