//! Chat request handler — echo stub.
//!
//! Acknowledges the submitted text and/or file name. It never calls the
//! workflow webhook and does not inspect file content.

use axum::Json;
use axum::extract::Multipart;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::ChatReply;

const NO_INPUT: &str = "No message or file provided";
const MESSAGE_ACK: &str = "👋 لقد أرسلت: ";
const FILE_ACK: &str = "📂 استلمت الملف: ";
const SEPARATOR: &str = " | ";

/// A file part carrying this literal name is treated as no file.
const UNDEFINED_FILE_NAME: &str = "undefined";

/// `POST /api/chat` — multipart with optional `message` and `file` fields.
pub async fn chat_handler(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ChatReply>> {
    let mut multipart =
        multipart.map_err(|e| AppError::Internal(format!("Invalid multipart body: {e}")))?;

    let mut message: Option<String> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(field_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("message") if message.is_none() => {
                message = Some(field.text().await.map_err(field_error)?);
            }
            Some("file") if file_name.is_none() => {
                let name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(field_error)?;
                debug!(file = ?name, size = bytes.len(), "received file part");
                file_name = name;
            }
            _ => {}
        }
    }

    let reply = compose_reply(message.as_deref(), file_name.as_deref())
        .ok_or_else(|| AppError::Validation(NO_INPUT.into()))?;

    info!(
        has_message = message.as_deref().is_some_and(|m| !m.is_empty()),
        has_file = file_name.is_some(),
        "chat submission acknowledged"
    );
    Ok(Json(ChatReply { reply }))
}

/// Any non-POST method on the chat path.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Build the acknowledgment, or `None` when neither input is usable.
pub fn compose_reply(message: Option<&str>, file_name: Option<&str>) -> Option<String> {
    let message = message.filter(|m| !m.is_empty());
    let file_name = file_name.filter(|n| !n.is_empty() && *n != UNDEFINED_FILE_NAME);

    let parts: Vec<String> = [
        message.map(|m| format!("{MESSAGE_ACK}{m}")),
        file_name.map(|n| format!("{FILE_ACK}{n}")),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(SEPARATOR))
    }
}

fn field_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Internal(format!("Failed to read multipart field: {e}"))
    }
}
