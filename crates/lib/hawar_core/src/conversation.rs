//! Conversation client.
//!
//! Holds the ordered, append-only message list and drives one exchange with
//! the workflow webhook per send. A send ends with either a reply appended or
//! the visible error set. `send` holds `&mut self` for the whole webhook call,
//! so overlapping sends on one conversation cannot be expressed.
//!
//! The user message is appended before the webhook call and is kept when the
//! call fails. There is no retry; the user resends manually.

use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::message::Message;
use crate::payload::{Attachment, OutboundPayload};
use crate::reply::WebhookReply;
use crate::webhook::{CONNECTION_ERROR, WebhookClient, WebhookError, WebhookTransport};

/// Error shown to the user when a send fails.
pub const SEND_FAILED: &str = "فشل في إرسال الرسالة. حاول مرة أخرى.";

/// Result of a single send.
#[derive(Debug)]
pub enum SendOutcome {
    /// Nothing to send; no state change, no request.
    Ignored,
    /// Reply appended as an AI message.
    Replied(WebhookReply),
    /// Webhook call failed; the visible error is set.
    Failed(WebhookError),
}

/// In-memory conversation with a workflow webhook.
pub struct Conversation<T = WebhookClient> {
    config: ClientConfig,
    transport: T,
    messages: Vec<Message>,
    input: String,
    attachment: Option<Attachment>,
    error: Option<String>,
}

impl Conversation<WebhookClient> {
    /// Conversation backed by the HTTP webhook client.
    pub fn connect(config: ClientConfig) -> Result<Self, WebhookError> {
        let transport = WebhookClient::new(&config)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: WebhookTransport> Conversation<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            messages: Vec::new(),
            input: String::new(),
            attachment: None,
            error: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
    }

    pub fn remove_attachment(&mut self) {
        self.attachment = None;
    }

    /// Drop all messages and the visible error.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.error = None;
    }

    /// Set the pending input and attachment, then send.
    pub async fn send_message(
        &mut self,
        input: impl Into<String>,
        attachment: Option<Attachment>,
    ) -> SendOutcome {
        self.input = input.into();
        self.attachment = attachment;
        self.send().await
    }

    /// Send the pending input and attachment.
    pub async fn send(&mut self) -> SendOutcome {
        if self.input.is_empty() && self.attachment.is_none() {
            return SendOutcome::Ignored;
        }

        self.error = None;

        let input = std::mem::take(&mut self.input);
        let attachment = self.attachment.take();

        self.messages.push(Message::from_user(
            &input,
            attachment.as_ref().map(|a| a.name.as_str()),
        ));

        let payload =
            OutboundPayload::new(&input, attachment.as_ref(), self.config.inline_file_limit);

        match self.transport.post(&payload).await {
            Ok(body) => {
                let reply = WebhookReply::decode(&body);
                info!(session_id = %payload.session_id, "webhook reply received");
                self.messages.push(Message::from_ai(reply.text()));
                SendOutcome::Replied(reply)
            }
            Err(e) => {
                warn!(session_id = %payload.session_id, error = %e, "{CONNECTION_ERROR}");
                self.error = Some(SEND_FAILED.to_string());
                SendOutcome::Failed(e)
            }
        }
    }
}
