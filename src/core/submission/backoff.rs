//! Retry backoff schedule and sleep abstraction

use crate::config::RetryConfig;
use async_trait::async_trait;
use std::time::Duration;

/// Sleep abstraction used by the retry loop
///
/// Production code sleeps on the tokio timer; tests inject a recorder so
/// retry schedules are assertable without wall-clock waits.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the current task for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Capped exponential backoff schedule
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    initial_delay_ms: u64,
    max_delay_ms: u64,
    backoff_multiplier: f64,
}

impl BackoffPolicy {
    /// Create a backoff policy from retry configuration
    pub fn new(retry: &RetryConfig) -> Self {
        Self {
            initial_delay_ms: retry.initial_delay_ms,
            max_delay_ms: retry.max_delay_ms,
            backoff_multiplier: retry.backoff_multiplier,
        }
    }

    /// Delay before the retry that follows attempt `attempt` (zero-based)
    ///
    /// With the default configuration the schedule is 5s, 10s, 20s, then
    /// capped at 30s.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        // Calculate backoff delay
        let delay_ms = (self.initial_delay_ms as f64) * self.backoff_multiplier.powi(attempt as i32);
        let delay_ms = delay_ms.min(self.max_delay_ms as f64);

        Duration::from_millis(delay_ms as u64)
    }
}
