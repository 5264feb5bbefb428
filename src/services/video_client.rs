use async_trait::async_trait;
use std::time::Duration;

use crate::error::RemoteServiceError;
use crate::models::{ExportRequest, RemoteResponse, ServiceConfig, WireContract};

/// Path of the video endpoint below the service base URL
pub const VIDEO_ENDPOINT: &str = "/api/video";

/// Header carrying the wire contract version of the request body
pub const CONTRACT_HEADER: &str = "X-Statmap-Contract";

/// Remote service that turns a map snapshot plus time series into a video.
#[async_trait]
pub trait VideoService: Send + Sync {
    async fn submit(&self, request: &ExportRequest) -> Result<RemoteResponse, RemoteServiceError>;
}

/// [`VideoService`] reached over HTTP (`POST {base_url}/api/video`).
pub struct HttpVideoService {
    client: reqwest::Client,
    endpoint: String,
    contract: WireContract,
}

impl HttpVideoService {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        contract: WireContract,
    ) -> Result<Self, RemoteServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("statmap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint_url(base_url),
            contract,
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, RemoteServiceError> {
        Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            config.contract,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), VIDEO_ENDPOINT)
}

#[async_trait]
impl VideoService for HttpVideoService {
    async fn submit(&self, request: &ExportRequest) -> Result<RemoteResponse, RemoteServiceError> {
        let body = self.contract.body(request);

        tracing::info!(
            endpoint = %self.endpoint,
            contract = self.contract.version(),
            width = request.target.width,
            height = request.target.height,
            svg_bytes = request.document_text.len(),
            "Submitting video export"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTRACT_HEADER, self.contract.version())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Video service rejected export");
            return Err(RemoteServiceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| RemoteServiceError::InvalidBody(e.to_string()))?;

        tracing::debug!(status = status.as_u16(), "Video service accepted export");
        Ok(RemoteResponse(value))
    }
}
