//! Batch submission to the central API
//!
//! Three concerns, kept separate:
//!
//! - [`batch`] - The send loop: batching, retries, outcome persistence
//! - [`response`] - Interpreting acknowledgements and rejections
//! - [`backoff`] - The retry schedule and the sleep abstraction

pub mod backoff;
pub mod batch;
pub mod response;

pub use backoff::{BackoffPolicy, Sleeper, TokioSleeper};
pub use batch::{BatchSubmitter, SubmitSummary, SubmitterConfig};
