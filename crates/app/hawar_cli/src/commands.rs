//! `send` and `chat` subcommands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hawar_core::config::ClientConfig;
use hawar_core::conversation::{Conversation, SEND_FAILED, SendOutcome};
use hawar_core::payload::Attachment;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::WebhookArgs;
use crate::display::format_message;
use crate::{Error, Result};

/// Environment configuration with command-line overrides applied.
pub fn client_config(args: &WebhookArgs) -> Result<ClientConfig> {
    client_config_from(args, |key| std::env::var(key).ok())
}

/// Overridden keys are never read from `lookup`; validation runs once, last.
fn client_config_from<F>(args: &WebhookArgs, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ClientConfig::parse_lookup(|key| match key {
        "HAWAR_WEBHOOK_URL" if args.webhook_url.is_some() => None,
        "HAWAR_TIMEOUT_MS" if args.timeout_ms.is_some() => None,
        "HAWAR_RENDER_TABLES" if args.raw => None,
        _ => lookup(key),
    })?;
    if let Some(url) = &args.webhook_url {
        config.webhook_url = url.clone();
    }
    if let Some(ms) = args.timeout_ms {
        config.timeout = Duration::from_millis(ms);
    }
    if args.raw {
        config.render_tables = false;
    }
    config.validate()?;
    Ok(config)
}

pub async fn send(
    message: Option<String>,
    file: Option<PathBuf>,
    args: &WebhookArgs,
) -> Result<()> {
    let config = client_config(args)?;
    let mut conversation = Conversation::connect(config)?;

    let attachment = match file {
        Some(path) => Some(Attachment::from_path(path).await?),
        None => None,
    };

    match conversation
        .send_message(message.unwrap_or_default(), attachment)
        .await
    {
        SendOutcome::Ignored => Err(Error::Custom(
            "Nothing to send: provide a message or --file".into(),
        )),
        SendOutcome::Replied(_) => {
            for msg in conversation.messages() {
                println!("{}", format_message(msg, conversation.config()));
            }
            Ok(())
        }
        SendOutcome::Failed(e) => {
            log::debug!("send failed: {e}");
            Err(Error::SendFailed(
                conversation.error().unwrap_or(SEND_FAILED).to_string(),
            ))
        }
    }
}

/// A line typed in the interactive session.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Clear,
    Detach,
    Attach(&'a Path),
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    match trimmed {
        "/quit" | "/exit" => Input::Quit,
        "/clear" => Input::Clear,
        "/detach" => Input::Detach,
        _ => match trimmed.strip_prefix("/file ") {
            Some(path) if !path.trim().is_empty() => Input::Attach(Path::new(path.trim())),
            _ => Input::Message(line),
        },
    }
}

pub async fn chat(args: &WebhookArgs) -> Result<()> {
    let config = client_config(args)?;
    let mut conversation = Conversation::connect(config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Clear => {
                conversation.clear();
                println!("(cleared)");
            }
            Input::Detach => conversation.remove_attachment(),
            Input::Attach(path) => match Attachment::from_path(path).await {
                Ok(file) => {
                    println!(
                        "attached {} ({:.1} KB)",
                        file.name,
                        file.size() as f64 / 1024.0
                    );
                    conversation.attach(file);
                }
                Err(e) => eprintln!("{e}"),
            },
            Input::Message(text) => {
                conversation.set_input(text);
                let before = conversation.messages().len();
                match conversation.send().await {
                    SendOutcome::Ignored => {}
                    SendOutcome::Replied(_) => {
                        // The user's own line is already on screen.
                        for msg in conversation.messages().iter().skip(before + 1) {
                            println!("{}", format_message(msg, conversation.config()));
                        }
                    }
                    SendOutcome::Failed(e) => {
                        log::debug!("send failed: {e}");
                        eprintln!("{}", conversation.error().unwrap_or(SEND_FAILED));
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_commands() {
        assert_eq!(parse_input("/quit"), Input::Quit);
        assert_eq!(parse_input(" /exit "), Input::Quit);
        assert_eq!(parse_input("/clear"), Input::Clear);
        assert_eq!(parse_input("/detach"), Input::Detach);
        assert_eq!(
            parse_input("/file ./notes.txt"),
            Input::Attach(Path::new("./notes.txt"))
        );
    }

    #[test]
    fn everything_else_is_a_message() {
        assert_eq!(parse_input("hello there"), Input::Message("hello there"));
        assert_eq!(parse_input("/file "), Input::Message("/file "));
        assert_eq!(parse_input(""), Input::Message(""));
    }

    #[test]
    fn message_whitespace_is_preserved() {
        assert_eq!(parse_input("  hi  "), Input::Message("  hi  "));
        assert_eq!(parse_input("   "), Input::Message("   "));
    }

    #[test]
    fn overrides_apply_on_top_of_env() {
        let args = WebhookArgs {
            webhook_url: Some("http://127.0.0.1:5678/webhook/x".into()),
            timeout_ms: Some(250),
            raw: true,
        };
        let config = client_config(&args).unwrap();
        assert_eq!(config.webhook_url, "http://127.0.0.1:5678/webhook/x");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(!config.render_tables);
    }

    #[test]
    fn valid_overrides_replace_invalid_env_values() {
        let args = WebhookArgs {
            webhook_url: Some("http://127.0.0.1:9/hook".into()),
            timeout_ms: Some(500),
            raw: true,
        };
        let config = client_config_from(&args, |key| match key {
            "HAWAR_WEBHOOK_URL" => Some("not-a-url".into()),
            "HAWAR_TIMEOUT_MS" => Some("0".into()),
            "HAWAR_RENDER_TABLES" => Some("maybe".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.webhook_url, "http://127.0.0.1:9/hook");
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert!(!config.render_tables);
    }

    #[test]
    fn invalid_env_without_override_is_rejected() {
        let result = client_config_from(&WebhookArgs::default(), |key| {
            (key == "HAWAR_TIMEOUT_MS").then(|| "0".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = WebhookArgs {
            webhook_url: Some("not a url".into()),
            ..WebhookArgs::default()
        };
        assert!(matches!(client_config(&args), Err(Error::Config(_))));
    }
}
