//! Outbound email transport

use crate::config::MailerConfig;
use crate::error::TransportError;
use crate::types::SubmissionPayload;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, instrument};

/// Status and body of the API response.
///
/// Any HTTP response is returned as-is; deciding whether the status counts as
/// success is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Delivers one submission payload.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, payload: &SubmissionPayload) -> Result<TransportResponse, TransportError>;
}

/// Brevo transactional email API
pub struct BrevoTransport {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl BrevoTransport {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Build from configuration; fails without an API key.
    pub fn from_config(config: &MailerConfig) -> Result<Self, TransportError> {
        Self::new(config.api_url.clone(), config.api_key()?)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl EmailTransport for BrevoTransport {
    #[instrument(skip(self, payload), fields(url = %self.api_url, attachments = payload.attachment.len()))]
    async fn send(&self, payload: &SubmissionPayload) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(&self.api_url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header("api-key", &self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "email API responded");

        Ok(TransportResponse { status, body })
    }
}
