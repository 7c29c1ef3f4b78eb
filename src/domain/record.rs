//! Staging record domain model
//!
//! This module defines the lifecycle types for one row of the staging
//! table: the loader-assigned row state, the submission status, the row
//! projections the engine reads, and the per-record outcome values the
//! submitter writes back.

use super::ids::PersonId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of characters of API response text persisted per record
pub const MAX_API_RESPONSE_CHARS: usize = 500;

/// Loader-assigned lifecycle tag of a staging row
///
/// Drives which payload-building path applies. The engine consumes this
/// state; it only ever writes it back as `Unchanged` after a confirmed
/// successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowState {
    New,
    Updated,
    Deleted,
    Unchanged,
}

impl RowState {
    /// Returns the state as the lowercase string stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            RowState::New => "new",
            RowState::Updated => "updated",
            RowState::Deleted => "deleted",
            RowState::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for RowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RowState {
    type Err = String;

    // Loaders write mixed-case values ("New", "Updated"), so parsing is
    // case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(RowState::New),
            "updated" => Ok(RowState::Updated),
            "deleted" => Ok(RowState::Deleted),
            "unchanged" => Ok(RowState::Unchanged),
            other => Err(format!(
                "Invalid row state: {other}. Must be one of: new, updated, deleted, unchanged"
            )),
        }
    }
}

/// Submission status of a staging row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Sent,
    Error,
}

impl SubmissionStatus {
    /// Returns the status as the lowercase string stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Sent => "sent",
            SubmissionStatus::Error => "error",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "sent" => Ok(SubmissionStatus::Sent),
            "error" => Ok(SubmissionStatus::Error),
            other => Err(format!(
                "Invalid submission status: {other}. Must be one of: pending, sent, error"
            )),
        }
    }
}

/// One row eligible for partial-payload regeneration
///
/// Current and previous payloads are carried as raw text so the delta pass
/// can short-circuit byte-identical snapshots without parsing them.
#[derive(Debug, Clone)]
pub struct DiffCandidate {
    pub person_id: PersonId,
    pub row_state: RowState,
    pub current_raw: String,
    pub previous_raw: String,
}

/// One row ready for submission, with its resolved outbound document
#[derive(Debug, Clone)]
pub struct PendingRecord {
    pub person_id: PersonId,
    pub payload: serde_json::Value,
}

impl PendingRecord {
    pub fn new(person_id: PersonId, payload: serde_json::Value) -> Self {
        Self { person_id, payload }
    }
}

/// One buffered write produced by the delta pass
///
/// All writes of one pass are applied in a single transaction.
#[derive(Debug, Clone)]
pub enum PartialWrite {
    /// Regenerated outbound payload
    Payload { person_id: PersonId, payload: String },

    /// The row's stored JSON could not be used; mark it failed
    Failure { person_id: PersonId, message: String },
}

/// Result of submitting one record within a batch
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    /// The API acknowledged the record
    Accepted {
        reference: String,
        timestamp: DateTime<Utc>,
    },

    /// The record was not accepted; diagnostic text bounded for storage
    Failed { message: String },
}

impl SubmissionResult {
    /// Creates a failure result, truncating the message to the persisted bound
    pub fn failed(message: impl Into<String>) -> Self {
        let message: String = message.into();
        let message = if message.chars().count() > MAX_API_RESPONSE_CHARS {
            message.chars().take(MAX_API_RESPONSE_CHARS).collect()
        } else {
            message
        };
        SubmissionResult::Failed { message }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionResult::Accepted { .. })
    }
}

/// Per-record outcome of one batch attempt, ready to persist
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub person_id: PersonId,
    pub result: SubmissionResult,
}

impl RecordOutcome {
    pub fn new(person_id: PersonId, result: SubmissionResult) -> Self {
        Self { person_id, result }
    }
}
