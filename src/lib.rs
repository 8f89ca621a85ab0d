//! Library root for `homework-bot`.
//!
//! Homework-bot is a Telegram assistant for homework reviews designed to:
//! - Poll the review API for the latest submission status
//! - Detect status changes without repeating itself
//! - Forward a human-readable verdict to a chat
//! - Survive transient network and API failures indefinitely
//!
//! The bot integrates with the Practicum review API over HTTP and Telegram
//! for chat. The architecture is built around extensible traits that allow
//! for different implementations of each service.

#[deny(missing_docs)]
pub mod base;
pub mod poller;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the homework-bot runtime:
/// - Creates the runtime context with the review API and notifier clients
/// - Starts the main poll loop
pub async fn start(config: Config) -> Void {
    info!("Starting homework-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
