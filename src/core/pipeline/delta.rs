//! Delta pass over the staging table
//!
//! The delta pass runs before submission: it reads every row eligible for
//! diffing, regenerates the outbound partial payload (or the deletion
//! payload for rows that left the cohort), and persists the whole pass in
//! one transaction. Rows whose stored JSON cannot be parsed are marked
//! failed individually; one bad row never aborts the pass.

use crate::adapters::staging::StagingStore;
use crate::core::diff::{DiffEngine, DiffStats};
use crate::core::payload::{build_deletion, build_partial};
use crate::domain::{PartialWrite, Result, RowState};
use serde_json::Value;
use std::sync::Arc;

/// Counters for one delta pass
#[derive(Debug, Clone, Default)]
pub struct DeltaSummary {
    /// Rows read from the staging table
    pub checked: usize,
    /// Partial payloads regenerated for updated rows
    pub deltas: usize,
    /// Deletion payloads built for rows that left the cohort
    pub deletions: usize,
    /// Rows skipped because their state is `unchanged`
    pub skipped_unchanged: usize,
    /// New rows skipped (they submit their full document)
    pub skipped_new: usize,
    /// Rows skipped because both snapshots are byte-identical
    pub skipped_identical: usize,
    /// Rows whose stored JSON failed to parse
    pub parse_failures: usize,
    /// Diff traversal counters accumulated across the pass
    pub stats: DiffStats,
}

impl DeltaSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload writes the pass produced (partials plus deletions)
    pub fn writes(&self) -> usize {
        self.deltas + self.deletions
    }

    /// Log the pass summary
    pub fn log_summary(&self) {
        tracing::info!(
            checked = self.checked,
            deltas = self.deltas,
            deletions = self.deletions,
            skipped_unchanged = self.skipped_unchanged,
            skipped_new = self.skipped_new,
            skipped_identical = self.skipped_identical,
            parse_failures = self.parse_failures,
            object_diffs = self.stats.object_diffs,
            list_reconciliations = self.stats.list_reconciliations,
            duplicate_identifiers = self.stats.duplicate_identifiers,
            "Delta pass summary"
        );
    }
}

/// Regenerates outbound payloads from the staged snapshots
///
/// One pass covers the whole table. Writes are buffered in row order and
/// handed to the store as a single transaction, so a crash mid-pass leaves
/// the previous pass's payloads intact.
pub struct DeltaPass {
    store: Arc<dyn StagingStore>,
    engine: DiffEngine,
    dry_run: bool,
}

impl DeltaPass {
    /// Create a new delta pass
    ///
    /// # Arguments
    ///
    /// * `store` - Staging store to read candidates from and write payloads to
    /// * `engine` - Configured diff engine
    /// * `dry_run` - Compute and count everything but skip the final write
    pub fn new(store: Arc<dyn StagingStore>, engine: DiffEngine, dry_run: bool) -> Self {
        Self {
            store,
            engine,
            dry_run,
        }
    }

    /// Run the pass over every eligible staging row
    ///
    /// Row handling in order: `unchanged` rows are counted and skipped,
    /// byte-identical snapshots are skipped without parsing, `new` rows are
    /// skipped (their full document submits as-is), `deleted` rows build a
    /// deletion payload from the previous snapshot, and everything else
    /// builds a partial payload from both snapshots. Parse failures become
    /// per-row failure writes.
    ///
    /// # Errors
    ///
    /// Returns an error if candidates cannot be fetched or the final
    /// transaction fails.
    pub async fn run(&self) -> Result<DeltaSummary> {
        tracing::info!(dry_run = self.dry_run, "Starting delta pass");

        let candidates = self.store.fetch_diff_candidates().await?;
        let mut summary = DeltaSummary::new();
        let mut writes: Vec<PartialWrite> = Vec::new();

        for candidate in candidates {
            summary.checked += 1;

            // The fetch query excludes unchanged rows; a loader writing
            // mid-run can still surface one.
            if candidate.row_state == RowState::Unchanged {
                summary.skipped_unchanged += 1;
                continue;
            }

            if candidate.current_raw == candidate.previous_raw {
                tracing::debug!(
                    person_id = %candidate.person_id,
                    "Snapshots byte-identical, skipping"
                );
                summary.skipped_identical += 1;
                continue;
            }

            // New rows have no submitted baseline; they travel in full.
            if candidate.row_state == RowState::New {
                summary.skipped_new += 1;
                continue;
            }

            if candidate.row_state == RowState::Deleted {
                // Only the previous snapshot matters for a deletion; the
                // current one may be empty or stale by the time the row is
                // marked deleted.
                match serde_json::from_str::<Value>(&candidate.previous_raw) {
                    Ok(previous) => {
                        let payload = build_deletion(&previous);
                        writes.push(PartialWrite::Payload {
                            person_id: candidate.person_id,
                            payload: payload.to_string(),
                        });
                        summary.deletions += 1;
                    }
                    Err(e) => {
                        tracing::warn!(
                            person_id = %candidate.person_id,
                            error = %e,
                            "Stored previous payload is not valid JSON"
                        );
                        writes.push(PartialWrite::Failure {
                            person_id: candidate.person_id,
                            message: format!("Invalid JSON in previous_json_payload: {}", e),
                        });
                        summary.parse_failures += 1;
                    }
                }
                continue;
            }

            let current = match serde_json::from_str::<Value>(&candidate.current_raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(
                        person_id = %candidate.person_id,
                        error = %e,
                        "Stored current payload is not valid JSON"
                    );
                    writes.push(PartialWrite::Failure {
                        person_id: candidate.person_id,
                        message: format!("Invalid JSON in json_payload: {}", e),
                    });
                    summary.parse_failures += 1;
                    continue;
                }
            };

            let previous = match serde_json::from_str::<Value>(&candidate.previous_raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(
                        person_id = %candidate.person_id,
                        error = %e,
                        "Stored previous payload is not valid JSON"
                    );
                    writes.push(PartialWrite::Failure {
                        person_id: candidate.person_id,
                        message: format!("Invalid JSON in previous_json_payload: {}", e),
                    });
                    summary.parse_failures += 1;
                    continue;
                }
            };

            let (payload, stats) = build_partial(&current, &previous, &self.engine);
            summary.stats.absorb(stats);
            writes.push(PartialWrite::Payload {
                person_id: candidate.person_id,
                payload: payload.to_string(),
            });
            summary.deltas += 1;
        }

        if self.dry_run {
            tracing::info!(
                planned_writes = writes.len(),
                "Dry run, skipping delta writes"
            );
        } else {
            self.store.write_partials(&writes).await?;
        }

        summary.log_summary();
        Ok(summary)
    }
}
