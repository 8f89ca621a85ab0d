//! The poll/diff/notify loop at the heart of the homework-bot.
//!
//! Each cycle fetches review updates since the cursor, validates the response
//! shape, derives a report for the newest work item, and notifies the chat
//! only when that report differs from the previously-notified one. Every
//! failure mode is absorbed here; nothing terminates the loop short of process
//! shutdown.

pub mod report;
pub mod validate;

use std::time::Duration;

use chrono::Utc;

use crate::{
    prelude::*,
    service::{NotifierClient, ReviewApiClient},
};

use report::Report;

/// The poll-loop state machine.
///
/// Owns the cursor and the last-notified report exclusively; there is no
/// shared state and at most one outstanding network call at a time.
pub struct Poller {
    config: Config,
    api: ReviewApiClient,
    notifier: NotifierClient,
    cursor: i64,
    last_report: Option<Report>,
}

impl Poller {
    /// Create a poller with the cursor set to the current wall-clock time.
    pub fn new(config: Config, api: ReviewApiClient, notifier: NotifierClient) -> Self {
        Self {
            config,
            api,
            notifier,
            cursor: Utc::now().timestamp(),
            last_report: None,
        }
    }

    /// The cursor the next poll will use as its `from_date` lower bound.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// The report most recently communicated (or attempted) to the chat.
    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    /// Run cycles forever, sleeping the configured interval between them.
    ///
    /// Returns only on Ctrl-C.
    pub async fn run(&mut self) -> Void {
        let interval = Duration::from_secs(self.config.poll_interval_secs);

        loop {
            self.cycle().await;

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown requested.");
                    return Ok(());
                }
            }
        }
    }

    /// Execute one poll cycle. Never fails: this is the outer failure boundary.
    #[instrument(skip_all)]
    pub async fn cycle(&mut self) {
        match self.poll().await {
            Ok(report) => self.publish(report).await,
            Err(err) if err.forward_to_chat() => {
                // Full detail to the logs; the chat gets the summary line,
                // subject to the same duplicate suppression as any report.
                error!("Cycle failed: {:?}", err);
                self.publish(Report::failure(&err.to_string())).await;
            }
            Err(err) => {
                error!("Cycle failed (not forwarded to chat): {}", err);
            }
        }
    }

    /// Fetch, advance the cursor, validate, and derive this cycle's report.
    async fn poll(&mut self) -> Result<Report, PollError> {
        let response = self.api.fetch_updates(self.cursor).await?;

        debug!("Fetched updates since {}.", self.cursor);

        // Advance the watermark on any successful fetch; keep the prior value
        // when the response carries no usable `current_date`.
        if let Some(watermark) = validate::current_date(&response) {
            self.cursor = watermark;
        }

        let homeworks = validate::validate(&response)?;

        match homeworks.first() {
            Some(newest) => Report::from_homework(newest),
            None => Ok(Report::nothing_to_review()),
        }
    }

    /// Notify the chat if `report` differs from the last-notified one.
    async fn publish(&mut self, report: Report) {
        if self.last_report.as_ref() == Some(&report) {
            debug!("No new statuses; skipping notification.");
            return;
        }

        let mut text = report.message.clone();

        if let Some(comment) = &report.comment {
            text.push_str("\nReviewer comment: ");
            text.push_str(comment);
        }

        let sent = self.notifier.notify(&text).await;

        // Reference behavior counts an attempted send as delivered; strict_ack
        // keeps retrying the same report until a send actually succeeds.
        if sent || !self.config.strict_ack {
            self.last_report = Some(report);
        }
    }
}
