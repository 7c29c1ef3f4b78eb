//! Core business logic for Hermes.
//!
//! This module contains the diff engine, payload builders, and the
//! submission pipeline that drives a run end to end.
//!
//! # Modules
//!
//! - [`diff`] - Structural JSON diff with per-block list reconciliation
//! - [`payload`] - Partial and deletion payload construction
//! - [`submission`] - Batch submission with retry and outcome reconciliation
//! - [`pipeline`] - Run orchestration: delta pass, then submission
//!
//! # Run Workflow
//!
//! The typical run:
//!
//! 1. **Delta pass**: Diff each staged row's current document against its
//!    previously submitted baseline and persist the partial payloads
//! 2. **Select**: Fetch rows pending submission
//! 3. **Authenticate**: Obtain a bearer token via client credentials
//! 4. **Submit**: POST fixed-size batches with capped-backoff retries
//! 5. **Reconcile**: Persist per-record outcomes after every batch
//! 6. **Report**: Reduce everything to a run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use hermes::config::load_config;
//! use hermes::core::pipeline::RunCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration
//! let config = load_config("hermes.toml")?;
//!
//! // Create shutdown signal
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! // Create run coordinator
//! let coordinator = RunCoordinator::new(config, shutdown_rx).await?;
//!
//! // Execute run
//! let summary = coordinator.execute_run().await?;
//!
//! println!("Pending: {}", summary.pending);
//! println!("Sent: {}", summary.sent());
//! println!("Failed: {}", summary.failed());
//! # Ok(())
//! # }
//! ```

pub mod diff;
pub mod payload;
pub mod pipeline;
pub mod submission;
