//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::{PollError, Res};

/// Default review API endpoint.
fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

/// Default number of seconds to sleep between poll cycles.
fn default_poll_interval_secs() -> u64 {
    600
}

/// Configuration for the homework-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared, immutable configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Deserialized configuration values for the application.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Review API token (`PRACTICUM_TOKEN`).
    pub practicum_token: String,
    /// Telegram bot token (`TELEGRAM_BOT_TOKEN`).
    pub telegram_bot_token: String,
    /// Telegram chat to notify (`TELEGRAM_CHAT_ID`).
    pub telegram_chat_id: String,
    /// Review API endpoint URL (`ENDPOINT`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Seconds to sleep between poll cycles (`POLL_INTERVAL_SECS`).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Optional HTTP request timeout in seconds (`REQUEST_TIMEOUT_SECS`).
    /// When unset, the transport default applies.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Only mark a report as delivered after a confirmed send (`STRICT_ACK`).
    /// The default matches the reference behavior: an attempted send counts.
    #[serde(default)]
    pub strict_ack: bool,
}

impl Config {
    /// Load configuration from the environment and an optional TOML file,
    /// validating that required credentials are present.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("HOMEWORK_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        // Missing credentials are fatal here, before the loop ever starts.
        if result.practicum_token.is_empty() {
            return Err(PollError::Token("practicum_token").into());
        }

        if result.telegram_bot_token.is_empty() {
            return Err(PollError::Token("telegram_bot_token").into());
        }

        if result.telegram_chat_id.is_empty() {
            return Err(PollError::Token("telegram_chat_id").into());
        }

        if result.poll_interval_secs == 0 {
            return Err(anyhow::anyhow!("Poll interval must be at least one second."));
        }

        Ok(result)
    }
}
