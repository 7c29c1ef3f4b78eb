//! Run summary
//!
//! Aggregates the delta pass and submission pass results for one run,
//! feeding both the structured completion log and the CLI report.

use crate::core::pipeline::delta::DeltaSummary;
use crate::core::submission::SubmitSummary;
use std::time::Duration;
use uuid::Uuid;

/// Summary of one submission run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Unique identifier for this run
    pub run_id: Uuid,
    /// True when the run computed but did not write or submit
    pub dry_run: bool,
    /// Records selected for submission
    pub pending: usize,
    /// Delta pass results, absent in full-payload mode
    pub delta: Option<DeltaSummary>,
    /// Submission results, absent in dry-run mode or when nothing was pending
    pub submission: Option<SubmitSummary>,
    /// Wall-clock duration of the run
    pub duration: Duration,
    /// True when a shutdown request stopped the run early
    pub interrupted: bool,
}

impl RunSummary {
    /// Create a new summary for a starting run
    pub fn new(run_id: Uuid, dry_run: bool) -> Self {
        Self {
            run_id,
            dry_run,
            pending: 0,
            delta: None,
            submission: None,
            duration: Duration::ZERO,
            interrupted: false,
        }
    }

    /// Set the run duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Records the API acknowledged
    pub fn sent(&self) -> usize {
        match &self.submission {
            Some(submission) => submission.sent,
            None => 0,
        }
    }

    /// Records that ended in a failure write, including delta parse failures
    pub fn failed(&self) -> usize {
        let submission_failures = match &self.submission {
            Some(submission) => submission.failed,
            None => 0,
        };
        let parse_failures = match &self.delta {
            Some(delta) => delta.parse_failures,
            None => 0,
        };
        submission_failures + parse_failures
    }

    /// Retry attempts consumed across all batches
    pub fn retries(&self) -> usize {
        match &self.submission {
            Some(submission) => submission.retries,
            None => 0,
        }
    }

    /// True when the run completed with no record-level failures
    pub fn is_successful(&self) -> bool {
        !self.interrupted && self.failed() == 0
    }

    /// Log the run summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            dry_run = self.dry_run,
            pending = self.pending,
            sent = self.sent(),
            failed = self.failed(),
            retries = self.retries(),
            interrupted = self.interrupted,
            duration_ms = self.duration.as_millis(),
            "Run summary"
        );
    }
}
