//! Workflow webhook transport.
//!
//! One JSON POST per send, bounded by the configured timeout. No retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::debug;

use crate::config::ClientConfig;
use crate::payload::OutboundPayload;
use crate::reply::WebhookBody;

/// Message reported to callers when the webhook cannot be reached.
pub const CONNECTION_ERROR: &str = "تعذر الاتصال بخدمة الذكاء الاصطناعي";

/// Errors talking to the workflow webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("Webhook request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Webhook request failed: {0}")]
    Request(String),

    #[error("Webhook returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Sends an outbound payload and returns the raw reply body.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post(&self, payload: &OutboundPayload) -> Result<WebhookBody, WebhookError>;
}

/// reqwest-backed webhook transport.
#[derive(Clone, Debug)]
pub struct WebhookClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl WebhookClient {
    pub fn new(config: &ClientConfig) -> Result<Self, WebhookError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WebhookError::Client(e.to_string()))?;
        Ok(Self {
            client,
            url: config.webhook_url.clone(),
            timeout: config.timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_error(&self, e: reqwest::Error) -> WebhookError {
        if e.is_timeout() {
            WebhookError::Timeout(self.timeout)
        } else {
            WebhookError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl WebhookTransport for WebhookClient {
    async fn post(&self, payload: &OutboundPayload) -> Result<WebhookBody, WebhookError> {
        debug!(url = %self.url, session_id = %payload.session_id, "posting to webhook");

        let resp = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await.map_err(|e| self.request_error(e))?;
        debug!(status = status.as_u16(), bytes = text.len(), "webhook replied");
        Ok(WebhookBody::from_text(text))
    }
}
