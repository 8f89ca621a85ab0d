//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the two services used by the
//! homework-bot:
//! - The review API (e.g., Practicum homework statuses)
//! - The notification channel (e.g., Telegram)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod practicum;
pub mod telegram;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;

use crate::base::types::{PollError, Void};

// Traits.

/// Generic review-API trait that clients must implement.
///
/// This trait defines the single call the poller makes against the homework
/// review service: fetch everything that changed since a given timestamp.
#[async_trait]
pub trait GenericReviewApi: Send + Sync + 'static {
    /// Fetch review updates since `from_date` (Unix seconds).
    ///
    /// Returns the raw JSON body on a 200 response. Shape validation is the
    /// poller's job, not the client's. No retry happens inside this call; the
    /// poll loop's fixed sleep is the retry.
    async fn fetch_updates(&self, from_date: i64) -> Result<Value, PollError>;
}

/// Generic notifier trait that clients must implement.
///
/// Implementing this trait allows different chat transports to carry the
/// status notifications.
#[async_trait]
pub trait GenericNotifier: Send + Sync + 'static {
    /// Send a plain-text message to the configured chat.
    async fn send_message(&self, text: &str) -> Void;
}

// Structs.

/// Review API client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ReviewApiClient {
    inner: Arc<dyn GenericReviewApi>,
}

impl Deref for ReviewApiClient {
    type Target = dyn GenericReviewApi;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ReviewApiClient {
    pub fn new(inner: Arc<dyn GenericReviewApi>) -> Self {
        Self { inner }
    }
}

/// Notifier client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct NotifierClient {
    inner: Arc<dyn GenericNotifier>,
}

impl Deref for NotifierClient {
    type Target = dyn GenericNotifier;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl NotifierClient {
    pub fn new(inner: Arc<dyn GenericNotifier>) -> Self {
        Self { inner }
    }

    /// Send `text`, reporting the outcome as a boolean.
    ///
    /// A transport failure is logged and returned as `false`; it never
    /// propagates into the caller's control flow.
    pub async fn notify(&self, text: &str) -> bool {
        match self.send_message(text).await {
            Ok(()) => {
                tracing::info!("Notification sent.");
                true
            }
            Err(err) => {
                tracing::error!("Failed to send notification: {}", err);
                false
            }
        }
    }
}
