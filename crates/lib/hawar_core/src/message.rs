//! Chat message domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// Whether the message carried an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    File,
}

/// A single exchanged message. Immutable once appended to a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl Message {
    /// User-authored message. Falls back to the file name when `text` is empty.
    pub fn from_user(text: &str, file_name: Option<&str>) -> Self {
        let text = if text.is_empty() {
            file_name.unwrap_or_default().to_string()
        } else {
            text.to_string()
        };
        Self {
            sender: Sender::User,
            text,
            timestamp: Utc::now(),
            kind: if file_name.is_some() {
                MessageKind::File
            } else {
                MessageKind::Text
            },
            file_name: file_name.map(str::to_string),
        }
    }

    /// AI reply.
    pub fn from_ai(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            text: text.into(),
            timestamp: Utc::now(),
            kind: MessageKind::Text,
            file_name: None,
        }
    }
}
