//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted logs
//! - Configurable log levels
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use hermes::logging::init_logging;
//! use hermes::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a submission run
///
/// # Example
///
/// ```no_run
/// use hermes::log_run_start;
///
/// let run_id = uuid::Uuid::new_v4();
/// log_run_start!(&run_id, 250);
/// ```
#[macro_export]
macro_rules! log_run_start {
    ($run_id:expr, $pending:expr) => {
        tracing::info!(
            run_id = %$run_id,
            pending = $pending,
            "Starting submission run"
        );
    };
}

/// Log the completion of a submission run
///
/// # Example
///
/// ```no_run
/// use hermes::log_run_complete;
/// use std::time::Duration;
///
/// let sent = 42;
/// let duration = Duration::from_secs(10);
/// log_run_complete!(sent, duration);
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($sent:expr, $duration:expr) => {
        tracing::info!(
            sent = $sent,
            duration_ms = $duration.as_millis(),
            "Submission run completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use hermes::log_error_with_context;
/// use hermes::domain::HermesError;
///
/// let error = HermesError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a batch processing operation
///
/// # Example
///
/// ```no_run
/// use hermes::log_batch_processing;
///
/// log_batch_processing!(100, 1000);
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing batch"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use hermes::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Rate limit exceeded");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = $reason,
            "Retrying operation"
        );
    };
}
