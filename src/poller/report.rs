//! Work items, verdict sentences, and the tracked report snapshot.

use serde::Deserialize;

use crate::base::types::PollError;

/// Message used when the API reports no homework awaiting review.
pub const NOTHING_TO_REVIEW: &str = "There is no homework to review yet.";

/// Fixed verdict sentence for each known review status.
const VERDICTS: &[(&str, &str)] = &[
    ("approved", "The work has been reviewed: the reviewer liked everything. Hooray!"),
    ("reviewing", "The work was taken up for review."),
    ("rejected", "The work has been reviewed: the reviewer has remarks."),
];

/// A single homework entry from the review API.
#[derive(Debug, Clone, Deserialize)]
pub struct Homework {
    #[serde(default)]
    pub homework_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reviewer_comment: Option<String>,
}

/// Build the status-change sentence for a work item.
///
/// Pure: same item, same sentence. Fails on a blank name or a status outside
/// the known verdict set rather than guessing.
pub fn describe(homework: &Homework) -> Result<String, PollError> {
    if homework.homework_name.is_empty() {
        return Err(PollError::MissingKey("homework_name"));
    }

    let verdict = VERDICTS
        .iter()
        .find(|(status, _)| *status == homework.status)
        .map(|(_, verdict)| *verdict)
        .ok_or_else(|| PollError::UnknownVerdict {
            status: homework.status.clone(),
        })?;

    Ok(format!("Changed review status of \"{}\". {}", homework.homework_name, verdict))
}

/// Snapshot of what was last communicated to the chat.
///
/// Rebuilt from scratch every cycle and compared by full structural equality
/// against the previously-notified snapshot to gate notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Name of the homework the report is about, if any.
    pub homework: Option<String>,
    /// The message body that was (or would be) sent.
    pub message: String,
    /// The reviewer comment, blank while the review is still in progress.
    pub comment: Option<String>,
}

impl Report {
    /// Derive a report from the newest work item.
    pub fn from_homework(homework: &Homework) -> Result<Self, PollError> {
        let message = describe(homework)?;

        // A comment is not meaningful until the review is resolved.
        let comment = if homework.status == "reviewing" {
            None
        } else {
            homework.reviewer_comment.clone()
        };

        Ok(Self {
            homework: Some(homework.homework_name.clone()),
            message,
            comment,
        })
    }

    /// Sentinel report for an empty work-item list.
    pub fn nothing_to_review() -> Self {
        Self {
            homework: None,
            message: NOTHING_TO_REVIEW.to_string(),
            comment: None,
        }
    }

    /// Report describing a program failure, for the outer boundary.
    pub fn failure(detail: &str) -> Self {
        Self {
            homework: None,
            message: format!("Program failure: {}", detail),
            comment: None,
        }
    }
}
