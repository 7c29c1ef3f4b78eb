//! Submission pipeline orchestration
//!
//! A run has two halves: the delta pass, which regenerates outbound
//! payloads from the staged snapshots, and the submission pass, which
//! batches pending records to the API and reconciles the outcomes. The
//! coordinator sequences them and owns the shared shutdown signal.

pub mod coordinator;
pub mod delta;
pub mod summary;

pub use coordinator::RunCoordinator;
pub use delta::{DeltaPass, DeltaSummary};
pub use summary::RunSummary;
