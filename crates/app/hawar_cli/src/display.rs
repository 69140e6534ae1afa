//! Terminal rendering of conversation messages.

use chrono::Local;
use hawar_core::config::ClientConfig;
use hawar_core::message::{Message, MessageKind, Sender};
use hawar_core::render::render;

/// One message as printed to the terminal.
pub fn format_message(msg: &Message, config: &ClientConfig) -> String {
    let who = match msg.sender {
        Sender::User => "you",
        Sender::Ai => "ai",
    };
    let head = if config.show_timestamps {
        let local = msg.timestamp.with_timezone(&Local);
        format!("[{}] {who}", local.format("%I:%M %p"))
    } else {
        who.to_string()
    };

    let mut body = if config.render_tables {
        render(&msg.text).to_string()
    } else {
        msg.text.clone()
    };
    if msg.kind == MessageKind::File
        && let Some(name) = msg.file_name.as_deref()
        && name != msg.text
    {
        body.push_str(&format!(" [file: {name}]"));
    }

    if body.contains('\n') {
        format!("{head}:\n{body}")
    } else {
        format!("{head}: {body}")
    }
}
