//! Common type aliases and the poll-cycle error taxonomy.

use thiserror::Error;

/// Crate-wide error type.
pub type Err = anyhow::Error;
/// Crate-wide result type.
pub type Res<T> = Result<T, Err>;
/// Result with no success value.
pub type Void = Res<()>;

/// Failure taxonomy for one poll cycle.
///
/// The loop treats these in two classes: errors that are logged and dropped
/// where they occur, and errors that bubble to the outer boundary and become a
/// best-effort "program failure" chat notification. `forward_to_chat` encodes
/// that split.
#[derive(Debug, Error)]
pub enum PollError {
    /// Transport-level failure reaching the review API.
    #[error("could not reach the review API (from_date={from_date}): {source}")]
    Request {
        /// The `from_date` query parameter used in the failed request.
        from_date: i64,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The review API answered with a non-200 status.
    #[error("review API returned {status} {reason}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The canonical reason phrase for the status code.
        reason: String,
        /// The response body text.
        body: String,
    },
    /// The response is missing `homeworks` or `current_date`.
    #[error("review API response is missing required fields")]
    EmptyResponse,
    /// The response (or a work item inside it) has the wrong shape.
    #[error("malformed review API response: {0}")]
    BadShape(String),
    /// A work item carries a status outside the known verdict set.
    #[error("unknown review status {status:?}")]
    UnknownVerdict {
        /// The unrecognized status string.
        status: String,
    },
    /// A required work-item field is absent.
    #[error("missing key {0:?} in work item")]
    MissingKey(&'static str),
    /// One or more required credentials are missing. Startup-only.
    #[error("missing required credential {0:?}")]
    Token(&'static str),
}

impl PollError {
    /// Whether the error text may be forwarded to the chat channel.
    ///
    /// Transport and API-side failures stay in the logs; shape and parser
    /// failures become a user-facing "program failure" notification.
    pub fn forward_to_chat(&self) -> bool {
        !matches!(
            self,
            PollError::Request { .. } | PollError::HttpStatus { .. } | PollError::EmptyResponse | PollError::Token(_)
        )
    }
}
