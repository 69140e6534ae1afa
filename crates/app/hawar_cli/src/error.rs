use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("{}", .0)]
    SendFailed(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("Config: {}", .0)]
    Config(#[from] hawar_core::config::ConfigError),

    #[error("Webhook: {}", .0)]
    Webhook(#[from] hawar_core::webhook::WebhookError),

    #[error("Attachment: {}", .0)]
    Attachment(#[from] hawar_core::payload::AttachmentError),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),
}
