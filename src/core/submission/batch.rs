//! Batch submission with retry and outcome reconciliation
//!
//! This module drives the outbound half of a run: pending records are cut
//! into fixed-size batches, each batch is POSTed with a capped-backoff
//! retry budget, and the acknowledgements (or the rejection) are turned
//! into per-record outcomes that persist atomically per batch. A run
//! interrupted between batches leaves exactly the completed batches
//! recorded; everything else stays selectable for the next run.

use crate::adapters::api::{ApiHeaders, Transport};
use crate::adapters::staging::StagingStore;
use crate::config::RetryConfig;
use crate::core::submission::backoff::{BackoffPolicy, Sleeper};
use crate::core::submission::response::{
    ack_to_result, attribute_batch_failure, explain_status, is_retryable,
};
use crate::domain::{PendingRecord, RecordOutcome, Result, SubmissionResult};
use crate::{log_batch_processing, log_retry_attempt};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;

/// Result of a submission pass
#[derive(Debug, Clone)]
pub struct SubmitSummary {
    /// Records the API acknowledged
    pub sent: usize,
    /// Records that ended in a failure write
    pub failed: usize,
    /// Batches fully processed (outcomes persisted)
    pub batches: usize,
    /// Retry attempts consumed across all batches
    pub retries: usize,
    /// True when a shutdown request stopped the pass early
    pub interrupted: bool,
}

impl SubmitSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            sent: 0,
            failed: 0,
            batches: 0,
            retries: 0,
            interrupted: false,
        }
    }

    /// Count a batch worth of outcomes
    pub fn absorb_outcomes(&mut self, outcomes: &[RecordOutcome]) {
        for outcome in outcomes {
            if outcome.result.is_accepted() {
                self.sent += 1;
            } else {
                self.failed += 1;
            }
        }
    }
}

impl Default for SubmitSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the batch submitter
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Absolute submission URL
    pub url: String,
    /// Records per POST
    pub batch_size: usize,
    /// Retry budget and backoff schedule
    pub retry: RetryConfig,
}

/// Batch submitter for pending records
///
/// Owns the send loop only; payload content is decided upstream and
/// persistence goes through the [`StagingStore`] trait.
pub struct BatchSubmitter {
    store: Arc<dyn StagingStore>,
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    headers: ApiHeaders,
    url: String,
    batch_size: usize,
    max_retries: usize,
    backoff: BackoffPolicy,
    shutdown_rx: watch::Receiver<bool>,
}

impl BatchSubmitter {
    /// Create a new batch submitter
    ///
    /// # Arguments
    ///
    /// * `store` - Staging store outcomes persist through
    /// * `transport` - HTTP transport for the submission endpoint
    /// * `sleeper` - Sleep implementation for retry backoff
    /// * `headers` - Headers for every request
    /// * `config` - Submission URL, batch size and retry schedule
    /// * `shutdown_rx` - Shutdown signal checked between batches
    pub fn new(
        store: Arc<dyn StagingStore>,
        transport: Arc<dyn Transport>,
        sleeper: Arc<dyn Sleeper>,
        headers: ApiHeaders,
        config: SubmitterConfig,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            store,
            transport,
            sleeper,
            headers,
            url: config.url,
            batch_size: config.batch_size,
            max_retries: config.retry.max_retries,
            backoff: BackoffPolicy::new(&config.retry),
            shutdown_rx,
        }
    }

    /// Submit pending records in fixed-size batches
    ///
    /// Each batch is fully resolved (including retries) and its outcomes
    /// persisted before the next batch starts. The shutdown signal is
    /// observed between batches only; an in-flight batch always completes.
    ///
    /// # Errors
    ///
    /// Returns an error if a batch cannot be serialized or outcomes cannot
    /// be persisted. Transport failures and API rejections are not errors;
    /// they become per-record failure outcomes.
    pub async fn submit(&self, records: Vec<PendingRecord>) -> Result<SubmitSummary> {
        let mut summary = SubmitSummary::new();

        if records.is_empty() {
            tracing::info!("No pending records to submit");
            return Ok(summary);
        }

        let total = records.len();
        let batch_count = (total + self.batch_size - 1) / self.batch_size;
        tracing::info!(
            total = total,
            batches = batch_count,
            batch_size = self.batch_size,
            "Starting batch submission"
        );

        for (index, batch) in records.chunks(self.batch_size).enumerate() {
            if *self.shutdown_rx.borrow() {
                tracing::warn!(
                    completed_batches = summary.batches,
                    remaining = total - index * self.batch_size,
                    "Shutdown requested, stopping between batches"
                );
                summary.interrupted = true;
                break;
            }

            log_batch_processing!(index + 1, batch_count);

            let outcomes = self.send_batch(batch, &mut summary).await?;
            self.store.apply_outcomes(&outcomes).await?;
            summary.absorb_outcomes(&outcomes);
            summary.batches += 1;
        }

        tracing::info!(
            sent = summary.sent,
            failed = summary.failed,
            batches = summary.batches,
            retries = summary.retries,
            "Batch submission finished"
        );
        Ok(summary)
    }

    /// Send one batch and resolve it to per-record outcomes
    async fn send_batch(
        &self,
        batch: &[PendingRecord],
        summary: &mut SubmitSummary,
    ) -> Result<Vec<RecordOutcome>> {
        let documents: Vec<&Value> = batch.iter().map(|record| &record.payload).collect();
        let body = serde_json::to_string(&documents)?;

        let mut attempt = 0;

        loop {
            let response = match self
                .transport
                .post(&self.url, &self.headers, body.clone())
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    // Transport failures are terminal for the batch; the
                    // request may never have reached the server.
                    tracing::error!(
                        error = %e,
                        batch_len = batch.len(),
                        "Batch request failed"
                    );
                    return Ok(fail_all(batch, &e.to_string()));
                }
            };

            if response.status == 200 {
                return Ok(reconcile_acks(batch, &response.body));
            }

            let explanation = explain_status(response.status);
            tracing::warn!(
                status = response.status,
                explanation = %explanation,
                body_preview = %preview(&response.body),
                "API rejected batch"
            );

            if is_retryable(response.status) && attempt + 1 < self.max_retries {
                let delay = self.backoff.delay_for(attempt);
                log_retry_attempt!(attempt + 1, self.max_retries, explanation.as_str());
                self.sleeper.sleep(delay).await;
                attempt += 1;
                summary.retries += 1;
                continue;
            }

            let messages = attribute_batch_failure(response.status, &response.body, batch.len());
            let outcomes = batch
                .iter()
                .zip(messages)
                .map(|(record, message)| {
                    RecordOutcome::new(record.person_id.clone(), SubmissionResult::failed(message))
                })
                .collect();
            return Ok(outcomes);
        }
    }
}

/// Resolve a 200 response body against the batch it answers
///
/// The body must be a JSON array of acknowledgement tokens, one per record
/// in batch order. Any other shape fails the whole batch without retry.
fn reconcile_acks(batch: &[PendingRecord], body: &str) -> Vec<RecordOutcome> {
    let acks: Vec<String> = match serde_json::from_str(body) {
        Ok(acks) => acks,
        Err(e) => {
            tracing::error!(error = %e, "Acknowledgement body is not a list of tokens");
            return fail_all(
                batch,
                &format!("Invalid acknowledgement response from API: {e}"),
            );
        }
    };

    if acks.len() != batch.len() {
        tracing::error!(
            expected = batch.len(),
            received = acks.len(),
            "Acknowledgement count mismatch"
        );
        return fail_all(
            batch,
            &format!(
                "Acknowledgement count {} does not match batch size {}",
                acks.len(),
                batch.len()
            ),
        );
    }

    batch
        .iter()
        .zip(acks.iter())
        .map(|(record, token)| RecordOutcome::new(record.person_id.clone(), ack_to_result(token)))
        .collect()
}

/// Fail every record in the batch with the same message
fn fail_all(batch: &[PendingRecord], message: &str) -> Vec<RecordOutcome> {
    batch
        .iter()
        .map(|record| {
            RecordOutcome::new(record.person_id.clone(), SubmissionResult::failed(message))
        })
        .collect()
}

fn preview(body: &str) -> String {
    body.chars().take(250).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::transport::test_headers;
    use crate::adapters::api::ApiResponse;
    use crate::adapters::staging::StagingCounts;
    use crate::domain::{DiffCandidate, HermesError, PartialWrite, PersonId};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    struct MockStore {
        applied: Mutex<Vec<Vec<RecordOutcome>>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                applied: Mutex::new(Vec::new()),
            }
        }

        fn applied_batches(&self) -> Vec<Vec<RecordOutcome>> {
            self.applied.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StagingStore for MockStore {
        async fn check_connectivity(&self) -> Result<()> {
            Ok(())
        }

        async fn validate_schema(&self) -> Result<()> {
            Ok(())
        }

        async fn fetch_diff_candidates(&self) -> Result<Vec<DiffCandidate>> {
            Ok(Vec::new())
        }

        async fn fetch_pending(&self, _use_partial_payload: bool) -> Result<Vec<PendingRecord>> {
            Ok(Vec::new())
        }

        async fn write_partials(&self, _writes: &[PartialWrite]) -> Result<()> {
            Ok(())
        }

        async fn apply_outcomes(&self, outcomes: &[RecordOutcome]) -> Result<()> {
            self.applied.lock().unwrap().push(outcomes.to_vec());
            Ok(())
        }

        async fn status_counts(&self) -> Result<StagingCounts> {
            Ok(StagingCounts::default())
        }
    }

    enum Scripted {
        Response(u16, &'static str),
        TransportError,
    }

    struct ScriptedTransport {
        script: Mutex<VecDeque<Scripted>>,
        bodies: Mutex<Vec<String>>,
        shutdown_tx: Mutex<Option<watch::Sender<bool>>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Scripted>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                bodies: Mutex::new(Vec::new()),
                shutdown_tx: Mutex::new(None),
            }
        }

        fn posted_bodies(&self) -> Vec<String> {
            self.bodies.lock().unwrap().clone()
        }

        fn shutdown_after_next_post(&self, tx: watch::Sender<bool>) {
            *self.shutdown_tx.lock().unwrap() = Some(tx);
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn post(
            &self,
            _url: &str,
            _headers: &ApiHeaders,
            body: String,
        ) -> Result<ApiResponse> {
            self.bodies.lock().unwrap().push(body);

            if let Some(tx) = self.shutdown_tx.lock().unwrap().take() {
                let _ = tx.send(true);
            }

            match self.script.lock().unwrap().pop_front() {
                Some(Scripted::Response(status, body)) => Ok(ApiResponse {
                    status,
                    body: body.to_string(),
                }),
                Some(Scripted::TransportError) => Err(HermesError::Api(
                    crate::domain::ApiError::ConnectionFailed("connection refused".to_string()),
                )),
                None => panic!("transport called more times than scripted"),
            }
        }

        async fn get(&self, _url: &str, _headers: &ApiHeaders) -> Result<ApiResponse> {
            panic!("GET not expected in submitter tests");
        }
    }

    struct RecordingSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn new() -> Self {
            Self {
                slept: Mutex::new(Vec::new()),
            }
        }

        fn delays(&self) -> Vec<Duration> {
            self.slept.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    fn pending(id: &str) -> PendingRecord {
        PendingRecord::new(
            PersonId::new(id).unwrap(),
            json!({"la_child_id": id, "child_details": {"first_name": "Ada"}}),
        )
    }

    fn submitter(
        store: Arc<MockStore>,
        transport: Arc<ScriptedTransport>,
        sleeper: Arc<RecordingSleeper>,
        batch_size: usize,
    ) -> (BatchSubmitter, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        let submitter = BatchSubmitter::new(
            store,
            transport,
            sleeper,
            test_headers(),
            SubmitterConfig {
                url: "https://api.example.com/children_social_care_data/123/children".to_string(),
                batch_size,
                retry: RetryConfig::default(),
            },
            rx,
        );
        (submitter, tx)
    }

    #[tokio::test]
    async fn test_submit_happy_path() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![Scripted::Response(
            200,
            r#"["2024-01-05_10:30:00.123_ref-a", "2024-01-05_10:30:01.456_ref-b"]"#,
        )]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport.clone(), sleeper.clone(), 10);
        let summary = submitter
            .submit(vec![pending("P1"), pending("P2")])
            .await
            .unwrap();

        assert_eq!(summary.sent, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.batches, 1);
        assert_eq!(summary.retries, 0);
        assert!(!summary.interrupted);
        assert!(sleeper.delays().is_empty());

        let applied = store.applied_batches();
        assert_eq!(applied.len(), 1);
        match &applied[0][0].result {
            SubmissionResult::Accepted { reference, .. } => assert_eq!(reference, "ref-a"),
            SubmissionResult::Failed { .. } => panic!("expected success"),
        }
    }

    #[tokio::test]
    async fn test_submit_body_is_ordered_json_array() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![Scripted::Response(
            200,
            r#"["t_1_a", "t_2_b"]"#,
        )]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store, transport.clone(), sleeper, 10);
        submitter
            .submit(vec![pending("P1"), pending("P2")])
            .await
            .unwrap();

        let bodies = transport.posted_bodies();
        assert_eq!(bodies.len(), 1);
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&bodies[0]).unwrap();
        assert_eq!(parsed[0]["la_child_id"], "P1");
        assert_eq!(parsed[1]["la_child_id"], "P2");
    }

    #[tokio::test]
    async fn test_retry_on_rate_limit_then_success() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![
            Scripted::Response(429, "slow down"),
            Scripted::Response(429, "slow down"),
            Scripted::Response(200, r#"["2024-01-05_10:30:00.123_ref-a"]"#),
        ]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport, sleeper.clone(), 10);
        let summary = submitter.submit(vec![pending("P1")]).await.unwrap();

        assert_eq!(summary.sent, 1);
        assert_eq!(summary.retries, 2);
        assert_eq!(
            sleeper.delays(),
            vec![Duration::from_millis(5000), Duration::from_millis(10000)]
        );
    }

    #[tokio::test]
    async fn test_retry_budget_exhausted() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![
            Scripted::Response(429, "slow down"),
            Scripted::Response(429, "slow down"),
            Scripted::Response(429, "slow down"),
        ]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport.clone(), sleeper.clone(), 10);
        let summary = submitter.submit(vec![pending("P1")]).await.unwrap();

        // Three attempts total, two backoff sleeps.
        assert_eq!(transport.posted_bodies().len(), 3);
        assert_eq!(sleeper.delays().len(), 2);
        assert_eq!(summary.sent, 0);
        assert_eq!(summary.failed, 1);

        let applied = store.applied_batches();
        match &applied[0][0].result {
            SubmissionResult::Failed { message } => {
                assert!(message.contains("API error (429): Rate limit exceeded"));
            }
            SubmissionResult::Accepted { .. } => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_non_retryable_rejection_attributes_indexes() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![Scripted::Response(
            400,
            r#"{"errors": {"[1]": ["invalid date"]}}"#,
        )]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport.clone(), sleeper.clone(), 10);
        let summary = submitter
            .submit(vec![pending("P1"), pending("P2")])
            .await
            .unwrap();

        // 400 never retries.
        assert_eq!(transport.posted_bodies().len(), 1);
        assert!(sleeper.delays().is_empty());
        assert_eq!(summary.failed, 2);

        let applied = store.applied_batches();
        match (&applied[0][0].result, &applied[0][1].result) {
            (
                SubmissionResult::Failed { message: first },
                SubmissionResult::Failed { message: second },
            ) => {
                assert!(first.contains("record valid but batch failed"));
                assert!(second.contains("invalid date"));
            }
            _ => panic!("expected two failures"),
        }
    }

    #[tokio::test]
    async fn test_ack_count_mismatch_fails_batch_without_retry() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![Scripted::Response(
            200,
            r#"["only-one-token"]"#,
        )]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport.clone(), sleeper, 10);
        let summary = submitter
            .submit(vec![pending("P1"), pending("P2")])
            .await
            .unwrap();

        assert_eq!(transport.posted_bodies().len(), 1);
        assert_eq!(summary.failed, 2);

        let applied = store.applied_batches();
        match &applied[0][0].result {
            SubmissionResult::Failed { message } => {
                assert_eq!(message, "Acknowledgement count 1 does not match batch size 2");
            }
            SubmissionResult::Accepted { .. } => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_non_array_ack_body_fails_batch() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![Scripted::Response(
            200,
            r#"{"accepted": true}"#,
        )]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport, sleeper, 10);
        let summary = submitter.submit(vec![pending("P1")]).await.unwrap();

        assert_eq!(summary.failed, 1);

        let applied = store.applied_batches();
        match &applied[0][0].result {
            SubmissionResult::Failed { message } => {
                assert!(message.starts_with("Invalid acknowledgement response from API"));
            }
            SubmissionResult::Accepted { .. } => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_fails_batch_without_retry() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![Scripted::TransportError]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport.clone(), sleeper.clone(), 10);
        let summary = submitter.submit(vec![pending("P1")]).await.unwrap();

        assert_eq!(transport.posted_bodies().len(), 1);
        assert!(sleeper.delays().is_empty());
        assert_eq!(summary.failed, 1);

        let applied = store.applied_batches();
        match &applied[0][0].result {
            SubmissionResult::Failed { message } => {
                assert!(message.contains("connection refused"));
            }
            SubmissionResult::Accepted { .. } => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_batches_cut_in_input_order() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![
            Scripted::Response(200, r#"["t_1_a", "t_2_b"]"#),
            Scripted::Response(200, r#"["t_3_c", "t_4_d"]"#),
            Scripted::Response(200, r#"["t_5_e"]"#),
        ]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport.clone(), sleeper, 2);
        let summary = submitter
            .submit(vec![
                pending("P1"),
                pending("P2"),
                pending("P3"),
                pending("P4"),
                pending("P5"),
            ])
            .await
            .unwrap();

        assert_eq!(summary.batches, 3);
        assert_eq!(summary.sent, 5);
        assert_eq!(transport.posted_bodies().len(), 3);

        // One apply_outcomes call per batch.
        let applied = store.applied_batches();
        assert_eq!(applied.len(), 3);
        assert_eq!(applied[0].len(), 2);
        assert_eq!(applied[2].len(), 1);
        assert_eq!(applied[2][0].person_id.as_str(), "P5");
    }

    #[tokio::test]
    async fn test_mixed_outcome_batches_continue() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![
            Scripted::Response(400, "bad batch"),
            Scripted::Response(200, r#"["2024-01-05_10:30:00.123_ref-b"]"#),
        ]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport, sleeper, 1);
        let summary = submitter
            .submit(vec![pending("P1"), pending("P2")])
            .await
            .unwrap();

        // The first batch failing does not stop the second.
        assert_eq!(summary.sent, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.batches, 2);
    }

    #[tokio::test]
    async fn test_shutdown_before_start_sends_nothing() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, tx) = submitter(store.clone(), transport.clone(), sleeper, 10);
        tx.send(true).unwrap();

        let summary = submitter.submit(vec![pending("P1")]).await.unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.batches, 0);
        assert!(transport.posted_bodies().is_empty());
        assert!(store.applied_batches().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_between_batches_persists_completed_work() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![Scripted::Response(
            200,
            r#"["2024-01-05_10:30:00.123_ref-a", "2024-01-05_10:30:01.456_ref-b"]"#,
        )]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, tx) = submitter(store.clone(), transport.clone(), sleeper, 2);
        transport.shutdown_after_next_post(tx);

        let summary = submitter
            .submit(vec![pending("P1"), pending("P2"), pending("P3"), pending("P4")])
            .await
            .unwrap();

        // First batch lands, second is never attempted.
        assert!(summary.interrupted);
        assert_eq!(summary.batches, 1);
        assert_eq!(summary.sent, 2);
        assert_eq!(transport.posted_bodies().len(), 1);
        assert_eq!(store.applied_batches().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input_is_a_noop() {
        let store = Arc::new(MockStore::new());
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport.clone(), sleeper, 10);
        let summary = submitter.submit(Vec::new()).await.unwrap();

        assert_eq!(summary.sent, 0);
        assert_eq!(summary.batches, 0);
        assert!(transport.posted_bodies().is_empty());
    }

    #[tokio::test]
    async fn test_failure_messages_truncated_for_storage() {
        let store = Arc::new(MockStore::new());
        let long_body = "x".repeat(2000);
        let transport = Arc::new(ScriptedTransport::new(vec![Scripted::Response(
            400,
            Box::leak(long_body.into_boxed_str()),
        )]));
        let sleeper = Arc::new(RecordingSleeper::new());

        let (submitter, _tx) = submitter(store.clone(), transport, sleeper, 10);
        submitter.submit(vec![pending("P1")]).await.unwrap();

        let applied = store.applied_batches();
        match &applied[0][0].result {
            SubmissionResult::Failed { message } => {
                assert_eq!(message.chars().count(), 500);
            }
            SubmissionResult::Accepted { .. } => panic!("expected failure"),
        }
    }
}
