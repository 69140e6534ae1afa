//! Decoding of workflow webhook replies.
//!
//! The workflow may answer with `{"response": ...}`, a bare string, or
//! `{"message": ...}`. Anything else maps to [`WebhookReply::Placeholder`].

use serde_json::Value;

/// Reply shown when the webhook response has no recognised field.
pub const PLACEHOLDER_REPLY: &str = "تم استلام رسالتك وسيتم الرد قريباً.";

/// Raw body returned by the webhook.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookBody {
    /// Body parsed as JSON.
    Json(Value),
    /// Body that is not valid JSON.
    Text(String),
}

impl WebhookBody {
    /// Parse a response body, keeping it as text when it is not JSON.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}

/// A webhook reply, tagged by the shape it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookReply {
    Response(String),
    Plain(String),
    Message(String),
    Placeholder,
}

impl WebhookReply {
    /// Decode, checking `response`, then a plain string body, then `message`.
    pub fn decode(body: &WebhookBody) -> Self {
        match body {
            WebhookBody::Text(text) if !text.is_empty() => Self::Plain(text.clone()),
            WebhookBody::Text(_) => Self::Placeholder,
            WebhookBody::Json(Value::String(s)) if !s.is_empty() => Self::Plain(s.clone()),
            WebhookBody::Json(Value::Object(map)) => {
                if let Some(v) = map.get("response").filter(|v| is_truthy(v)) {
                    Self::Response(value_text(v))
                } else if let Some(v) = map.get("message").filter(|v| is_truthy(v)) {
                    Self::Message(value_text(v))
                } else {
                    Self::Placeholder
                }
            }
            WebhookBody::Json(_) => Self::Placeholder,
        }
    }

    /// Text appended to the conversation as the AI message.
    pub fn text(&self) -> &str {
        match self {
            Self::Response(s) | Self::Plain(s) | Self::Message(s) => s,
            Self::Placeholder => PLACEHOLDER_REPLY,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Response(s) | Self::Plain(s) | Self::Message(s) => s,
            Self::Placeholder => PLACEHOLDER_REPLY.to_string(),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings as-is, anything else as compact JSON.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
