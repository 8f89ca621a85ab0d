//! Runtime services and shared state for the homework-bot.

use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    poller::Poller,
    service::{NotifierClient, ReviewApiClient},
};

/// Runtime service context for the application.
///
/// This struct holds the review API client, the notifier client, and the
/// configuration. It is designed to be trivially cloneable, allowing it to be
/// passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The review API client instance.
    pub api: ReviewApiClient,
    /// The notifier client instance.
    pub notifier: NotifierClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the review API client.
        let api = ReviewApiClient::practicum(&config)?;

        // Initialize the notifier client.
        let notifier = NotifierClient::telegram(&config)?;

        Ok(Self { config, api, notifier })
    }

    /// Run the poll loop until shutdown.
    pub async fn start(&self) -> Void {
        let mut poller = Poller::new(self.config.clone(), self.api.clone(), self.notifier.clone());

        poller.run().await
    }
}
