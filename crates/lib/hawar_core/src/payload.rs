//! Outbound webhook payload and file attachments.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::session::generate_session_id;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Errors loading an attachment from disk.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Attachment path has no file name: {0}")]
    NoFileName(String),

    #[error("Failed to read attachment {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A file selected for sending alongside (or instead of) a text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    /// MIME type; empty when unknown.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, inferring the MIME type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AttachmentError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AttachmentError::NoFileName(path.display().to_string()))?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| AttachmentError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.to_string())
            .unwrap_or_default();
        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Content encoded as `data:<mime>;base64,<content>`.
    pub fn to_data_url(&self) -> String {
        let mime = if self.mime_type.is_empty() {
            FALLBACK_MIME
        } else {
            self.mime_type.as_str()
        };
        format!("data:{mime};base64,{}", STANDARD.encode(&self.bytes))
    }
}

/// JSON body POSTed to the workflow webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundPayload {
    pub message: String,
    /// ISO-8601 send time.
    pub timestamp: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
}

impl OutboundPayload {
    /// Build a payload with the current time and a fresh session id.
    pub fn new(message: &str, attachment: Option<&Attachment>, inline_limit: u64) -> Self {
        Self::build(
            message,
            attachment,
            inline_limit,
            Utc::now(),
            generate_session_id(),
        )
    }

    /// Build a payload. File content is inlined only when the attachment is
    /// strictly smaller than `inline_limit`; metadata is always sent.
    pub fn build(
        message: &str,
        attachment: Option<&Attachment>,
        inline_limit: u64,
        now: DateTime<Utc>,
        session_id: String,
    ) -> Self {
        let mut payload = Self {
            message: message.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            session_id,
            file_name: None,
            file_type: None,
            file_size: None,
            file_content: None,
        };

        if let Some(file) = attachment {
            payload.file_name = Some(file.name.clone());
            payload.file_type = Some(file.mime_type.clone());
            payload.file_size = Some(file.size());

            if file.size() < inline_limit {
                payload.file_content = Some(file.to_data_url());
            } else {
                debug!(
                    file = %file.name,
                    size = file.size(),
                    limit = inline_limit,
                    "attachment too large to inline, sending metadata only"
                );
            }
        }

        payload
    }
}
