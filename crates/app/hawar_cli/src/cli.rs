use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hawar", version, about = "Chat with a workflow webhook")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one message (and optional file) and print the reply
    Send {
        /// Message text
        message: Option<String>,

        /// File to attach
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        webhook: WebhookArgs,
    },
    /// Interactive chat session (`/file PATH`, `/detach`, `/clear`, `/quit`)
    ///
    /// An empty line sends the attached file on its own, or does nothing.
    Chat {
        #[command(flatten)]
        webhook: WebhookArgs,
    },
    /// Print version
    Version,
}

/// Overrides for the `HAWAR_*` environment configuration.
#[derive(Args, Debug, Default)]
pub struct WebhookArgs {
    /// Workflow webhook URL
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Webhook timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Print JSON replies as raw text instead of tables
    #[arg(long)]
    pub raw: bool,
}
