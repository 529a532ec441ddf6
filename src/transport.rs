use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{info, error};

use crate::{config::ClientConfig, models::{ErrorBody, GenerateRequest, GenerateResponse}};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("status={status} details={details:?}")] Status { status: StatusCode, details: Option<String> },
    #[error("Malformed response: {0}")] MalformedResponse(String),
}

impl TransportError {
    /// The service-supplied `details` message, if the failure carried one.
    pub fn details(&self) -> Option<&str> {
        match self {
            TransportError::Status { details, .. } => details.as_deref().filter(|d| !d.trim().is_empty()),
            _ => None,
        }
    }
}

/// Performs one generation call against the remote service.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, TransportError>;
}

pub struct HttpTransport {
    client: Client,
    upload_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError::Http(e.to_string()))?;
        Ok(Self { client, upload_url: config.upload_url() })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, TransportError> {
        info!("🔗 Making request to: {}", self.upload_url);

        let response = self.client
            .post(&self.upload_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        let body = response.text().await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        if !status.is_success() {
            error!("❌ API Error response: {}", body);
            let details = serde_json::from_str::<ErrorBody>(&body).ok().and_then(|b| b.details);
            return Err(TransportError::Status { status, details });
        }

        serde_json::from_str::<GenerateResponse>(&body)
            .map_err(|e| TransportError::MalformedResponse(format!("{}: {}", e, truncate(&body, 200))))
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...[{} chars total]", &s[..idx], s.chars().count()),
        None => s.to_string(),
    }
}
