//! Domain models and types for Hermes.
//!
//! This module contains the core domain models, types, and business rules
//! for the submission engine: strongly-typed identifiers, the staging-row
//! lifecycle, per-record outcome values, and the error hierarchy.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PersonId`])
//! - **Staging lifecycle types** ([`RowState`], [`SubmissionStatus`],
//!   [`DiffCandidate`], [`PendingRecord`], [`RecordOutcome`])
//! - **Error types** ([`HermesError`], [`ApiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, HermesError>`]:
//!
//! ```rust
//! use hermes::domain::{HermesError, Result};
//!
//! fn example() -> Result<()> {
//!     // Errors are automatically converted using the ? operator
//!     let config = hermes::config::HermesConfig::from_file("hermes.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ApiError, HermesError};
pub use ids::PersonId;
pub use record::{
    DiffCandidate, PartialWrite, PendingRecord, RecordOutcome, RowState, SubmissionResult,
    SubmissionStatus, MAX_API_RESPONSE_CHARS,
};
pub use result::Result;
