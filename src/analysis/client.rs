//! Analysis service client

use async_trait::async_trait;

use super::types::{AnalysisRequest, AnalysisResult};
use crate::{Error, Result};

/// Transport seam to the remote analysis service
#[async_trait]
pub trait AnalysisBackend {
    /// Send one multimodal request and await the structured answer
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-success status, or an
    /// unparseable body.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;
}

/// HTTP client for the analysis service
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    /// Create a client for the given analyze endpoint
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// The configured analyze endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Probe the service's health endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the service is unreachable or unhealthy.
    pub async fn health(&self) -> Result<()> {
        let base = self
            .endpoint
            .strip_suffix("/analyze")
            .unwrap_or(&self.endpoint);
        let url = format!("{base}/health");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Service {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(url = %url, "analysis service healthy");
        Ok(())
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        tracing::debug!(
            endpoint = %self.endpoint,
            image_bytes = request.image.len(),
            audio_bytes = request.audio.len(),
            "sending analysis request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "analysis request failed");
                e
            })?;

        let status = response.status();
        tracing::debug!(status = %status, "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "analysis service error");
            return Err(Error::Service {
                status: status.as_u16(),
                body,
            });
        }

        let result: AnalysisResult = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse response");
            e
        })?;

        tracing::info!(
            intervention = result.intervention_needed,
            confidence = result.confidence,
            "analysis complete"
        );
        Ok(result)
    }
}
