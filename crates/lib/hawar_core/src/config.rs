//! Conversation client configuration.
//!
//! A single [`ClientConfig`] is injected into the conversation client, so the
//! webhook URL and display flags no longer live inside the front-end code.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// n8n test webhook the chat front-end was originally wired to.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://n8n.srv974225.hstgr.cloud/webhook-test/1947159d-0436-4b21-97ac-6360cabb1f1c";

/// Client-side timeout for a single webhook call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Attachments strictly smaller than this are inlined as base64.
pub const DEFAULT_INLINE_FILE_LIMIT: u64 = 500_000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Configuration for the conversation client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// External workflow webhook receiving the outbound payload.
    pub webhook_url: String,
    /// Timeout for the webhook round-trip.
    pub timeout: Duration,
    /// Size threshold (bytes) below which file content is inlined.
    pub inline_file_limit: u64,
    /// Render JSON-object replies as key/value tables.
    pub render_tables: bool,
    /// Show message timestamps in front-ends.
    pub show_timestamps: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            inline_file_limit: DEFAULT_INLINE_FILE_LIMIT,
            render_tables: true,
            show_timestamps: true,
        }
    }
}

impl ClientConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                  | Default              |
    /// |---------------------------|----------------------|
    /// | `HAWAR_WEBHOOK_URL`       | n8n test webhook     |
    /// | `HAWAR_TIMEOUT_MS`        | `30000`              |
    /// | `HAWAR_INLINE_FILE_LIMIT` | `500000`             |
    /// | `HAWAR_RENDER_TABLES`     | `true`               |
    /// | `HAWAR_SHOW_TIMESTAMPS`   | `true`               |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds and validates a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::parse_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses values from a key lookup without validating them, so callers
    /// can apply overrides before [`ClientConfig::validate`].
    pub fn parse_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout = match lookup("HAWAR_TIMEOUT_MS") {
            Some(v) => Duration::from_millis(parse_value("HAWAR_TIMEOUT_MS", &v)?),
            None => defaults.timeout,
        };
        let inline_file_limit = match lookup("HAWAR_INLINE_FILE_LIMIT") {
            Some(v) => parse_value("HAWAR_INLINE_FILE_LIMIT", &v)?,
            None => defaults.inline_file_limit,
        };
        let render_tables = match lookup("HAWAR_RENDER_TABLES") {
            Some(v) => parse_flag("HAWAR_RENDER_TABLES", &v)?,
            None => defaults.render_tables,
        };
        let show_timestamps = match lookup("HAWAR_SHOW_TIMESTAMPS") {
            Some(v) => parse_flag("HAWAR_SHOW_TIMESTAMPS", &v)?,
            None => defaults.show_timestamps,
        };

        Ok(Self {
            webhook_url: lookup("HAWAR_WEBHOOK_URL").unwrap_or(defaults.webhook_url),
            timeout,
            inline_file_limit,
            render_tables,
            show_timestamps,
        })
    }

    /// Checks that the webhook URL is http(s) and the timeout is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url: Url = self
            .webhook_url
            .parse()
            .map_err(|_| ConfigError::InvalidUrl(self.webhook_url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(self.webhook_url.clone()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

fn parse_value(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.inline_file_limit, 500_000);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("HAWAR_WEBHOOK_URL", "http://localhost:5678/webhook/abc"),
            ("HAWAR_TIMEOUT_MS", "1500"),
            ("HAWAR_INLINE_FILE_LIMIT", "1024"),
            ("HAWAR_RENDER_TABLES", "off"),
            ("HAWAR_SHOW_TIMESTAMPS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.webhook_url, "http://localhost:5678/webhook/abc");
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.inline_file_limit, 1024);
        assert!(!config.render_tables);
        assert!(!config.show_timestamps);
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = ClientConfig::from_lookup(lookup_from(&[("HAWAR_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = ClientConfig::from_lookup(lookup_from(&[(
            "HAWAR_WEBHOOK_URL",
            "ftp://example.com/hook",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn parse_defers_validation() {
        let config = ClientConfig::parse_lookup(lookup_from(&[
            ("HAWAR_WEBHOOK_URL", "not-a-url"),
            ("HAWAR_TIMEOUT_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.webhook_url, "not-a-url");
        assert!(config.timeout.is_zero());
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ClientConfig {
            timeout: Duration::ZERO,
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
