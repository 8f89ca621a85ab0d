//! Notification channel integration for the homework-bot.
//!
//! This module delivers status messages over the Telegram Bot API:
//! - Plain-text `sendMessage` calls addressed to a single chat
//! - Non-success responses surfaced as errors with status and body

use std::sync::Arc;

use async_trait::async_trait;

use crate::prelude::*;

use super::{GenericNotifier, NotifierClient};

// Extra methods on `NotifierClient` applied by the telegram implementation.

impl NotifierClient {
    /// Creates a new Telegram notifier client.
    pub fn telegram(config: &Config) -> Res<Self> {
        let client = TelegramNotifier::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Telegram notifier implementation.
#[derive(Clone)]
struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier.
    pub fn new(config: &Config) -> Res<Self> {
        Ok(Self {
            send_url: format!("https://api.telegram.org/bot{}/sendMessage", config.telegram_bot_token),
            chat_id: config.telegram_chat_id.clone(),
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl GenericNotifier for TelegramNotifier {
    #[instrument(skip_all)]
    async fn send_message(&self, text: &str) -> Void {
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let response = self.client.post(&self.send_url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            return Err(anyhow!("Telegram API returned {}: {}", status, body));
        }

        info!("Message delivered to chat {}.", self.chat_id);

        Ok(())
    }
}
