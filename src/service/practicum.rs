//! Review API integration for the homework-bot.
//!
//! This module talks to the Practicum homework-statuses endpoint:
//! - One GET per poll cycle with a `from_date` lower bound
//! - OAuth bearer header built from the API token
//! - Raw JSON body back to the poller for shape validation

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde_json::Value;

use crate::prelude::*;

use super::{GenericReviewApi, ReviewApiClient};

// Extra methods on `ReviewApiClient` applied by the practicum implementation.

impl ReviewApiClient {
    /// Creates a new Practicum review API client.
    pub fn practicum(config: &Config) -> Res<Self> {
        let client = PracticumReviewApi::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Practicum review API implementation.
#[derive(Clone)]
struct PracticumReviewApi {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl PracticumReviewApi {
    /// Create a new Practicum review API client.
    pub fn new(config: &Config) -> Res<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            endpoint: config.endpoint.clone(),
            token: config.practicum_token.clone(),
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl GenericReviewApi for PracticumReviewApi {
    #[instrument(skip(self))]
    async fn fetch_updates(&self, from_date: i64) -> Result<Value, PollError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|source| PollError::Request { from_date, source })?;

        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();

            return Err(PollError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                body,
            });
        }

        let value = response.json::<Value>().await.map_err(|source| PollError::Request { from_date, source })?;

        info!("Received review API response.");

        Ok(value)
    }
}
