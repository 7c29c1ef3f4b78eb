//! Staging store abstraction
//!
//! This module defines the narrow contract the pipeline has with the staging
//! database. The engine never creates or deletes rows; the loader owns the
//! table. Everything here reads rows or updates submission bookkeeping.

use crate::domain::{DiffCandidate, PartialWrite, PendingRecord, RecordOutcome, Result};
use async_trait::async_trait;

/// Row counts for the status report, grouped the way operators ask for them
#[derive(Debug, Clone, Default)]
pub struct StagingCounts {
    /// Rows per `submission_status` value
    pub by_status: Vec<(String, i64)>,

    /// Rows per `row_state` value
    pub by_row_state: Vec<(String, i64)>,
}

impl StagingCounts {
    /// Total number of staged rows
    pub fn total(&self) -> i64 {
        self.by_status.iter().map(|(_, count)| count).sum()
    }
}

/// Staging store contract
///
/// The store is the single shared mutable resource of a run. Transaction
/// boundaries are part of the contract: `write_partials` commits once for a
/// whole delta pass, `apply_outcomes` commits once per batch, so an
/// interrupted run leaves exactly the completed batches persisted.
#[async_trait]
pub trait StagingStore: Send + Sync {
    /// Test the database connection with a round-trip query
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn check_connectivity(&self) -> Result<()>;

    /// Verify the staging table carries the columns the pipeline touches
    ///
    /// # Errors
    ///
    /// Returns an error if the table is missing or lacks required columns.
    async fn validate_schema(&self) -> Result<()>;

    /// Fetch rows eligible for delta computation
    ///
    /// Rows with both payloads non-null and a row state other than
    /// `unchanged`. Raw payload text is returned unparsed so the delta pass
    /// can short-circuit byte-identical documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn fetch_diff_candidates(&self) -> Result<Vec<DiffCandidate>>;

    /// Fetch rows awaiting submission
    ///
    /// Rows with `submission_status` of `pending` or `error`, a row state
    /// other than `unchanged`, and a non-empty outbound document. In partial
    /// mode the outbound document is `partial_json_payload`, except `new`
    /// rows which submit their full `json_payload`; in full mode it is
    /// always `json_payload`. Rows whose stored document fails to parse are
    /// skipped with a warning.
    ///
    /// # Arguments
    ///
    /// * `use_partial_payload` - Partial mode (true) or full-document mode
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn fetch_pending(&self, use_partial_payload: bool) -> Result<Vec<PendingRecord>>;

    /// Persist the results of one delta pass in a single transaction
    ///
    /// Payload writes update `partial_json_payload`; failure writes record a
    /// per-record parse error. Nothing is visible to other connections until
    /// the whole pass commits.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails; no partial state is left
    /// behind.
    async fn write_partials(&self, writes: &[PartialWrite]) -> Result<()>;

    /// Persist one batch's submission outcomes in a single transaction
    ///
    /// Accepted records transition to `sent` and rebase their baseline
    /// (`previous_json_payload ← json_payload`, `previous_hash ←
    /// current_hash`, `row_state → unchanged`). Failed records transition to
    /// `error` with the diagnostic, keeping their baseline so the same delta
    /// is recomputed next run.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails; no partial state is left
    /// behind.
    async fn apply_outcomes(&self, outcomes: &[RecordOutcome]) -> Result<()>;

    /// Row counts grouped by submission status and row state
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn status_counts(&self) -> Result<StagingCounts>;
}
