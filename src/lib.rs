// Hermes - Children's Social Care Data Submission Engine
// Copyright (c) 2025 Hermes Contributors
// Licensed under the MIT License

//! # Hermes - Children's Social Care Data Submission Engine
//!
//! Hermes is a delta-payload submission tool built in Rust that reads per-child
//! case records from a local authority's PostgreSQL staging table, regenerates
//! minimal partial payloads, and submits them in resilient batches to the
//! children's social care data API.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Diffing** each child's current document against its previously
//!   submitted baseline, per-field and per-list-item
//! - **Building** partial payloads (anchor fields plus the change-set) and
//!   deletion payloads for children who left the cohort
//! - **Submitting** pending records in fixed-size batches with capped-backoff
//!   retries for transient rejections
//! - **Reconciling** acknowledgement tokens back onto staging rows so the
//!   next run only carries what actually changed
//!
//! ## Architecture
//!
//! Hermes follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (diff, payload, submission, pipeline)
//! - [`adapters`] - External integrations (staging database, submission API)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hermes::config::HermesConfig;
//! use hermes::core::pipeline::RunCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = HermesConfig::from_file("hermes.toml")?;
//!
//!     // Create shutdown signal
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     // Create run coordinator
//!     let coordinator = RunCoordinator::new(config, shutdown_rx).await?;
//!
//!     // Execute run
//!     let summary = coordinator.execute_run().await?;
//!
//!     println!("Sent {} of {} pending records", summary.sent(), summary.pending);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Partial Payloads
//!
//! Hermes never resubmits a full document for a known child. The diff engine
//! walks the current document against the baseline and keeps only what
//! changed; the payload builder merges that change-set over the identifying
//! anchor fields:
//!
//! ```rust
//! use hermes::config::DiffConfig;
//! use hermes::core::diff::DiffEngine;
//! use hermes::core::payload::build_partial;
//! use serde_json::json;
//!
//! let engine = DiffEngine::new(&DiffConfig::default());
//! let current = json!({
//!     "la_child_id": "C1",
//!     "mis_child_id": "M1",
//!     "child_details": {"first_name": "Ada"},
//!     "purge": false
//! });
//! let mut previous = current.clone();
//! previous["purge"] = json!(true);
//!
//! let (payload, _stats) = build_partial(&current, &previous, &engine);
//! assert_eq!(payload["purge"], json!(false));
//! ```
//!
//! ### Resilient Batches
//!
//! Batches are retried on transient rejections (401, 403, 429) with a
//! capped exponential backoff; permanent rejections are attributed to the
//! individual records named in the API's diagnostic and persisted as
//! per-record errors. Every completed batch commits its outcomes before the
//! next one starts, so an interrupted run never loses acknowledged work.
//!
//! ### Deletion Payloads
//!
//! Children who leave the cohort are reported with a minimal purge
//! instruction built from the previously submitted document:
//!
//! ```rust
//! use hermes::core::payload::build_deletion;
//! use serde_json::json;
//!
//! let previous = json!({"la_child_id": "C1", "mis_child_id": "M1"});
//! let payload = build_deletion(&previous);
//! assert_eq!(payload["purge"], json!(true));
//! ```
//!
//! ## Error Handling
//!
//! Hermes uses the [`domain::HermesError`] type for all errors:
//!
//! ```rust,no_run
//! use hermes::domain::HermesError;
//!
//! fn example() -> Result<(), HermesError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = hermes::config::HermesConfig::from_file("hermes.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Hermes uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting run");
//! warn!(person_id = "a1b2c3", "Stored payload is not valid JSON");
//! error!(error = "connection refused", "Run failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
