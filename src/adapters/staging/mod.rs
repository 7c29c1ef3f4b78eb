//! Staging database adapters
//!
//! The staging table is the hand-off point between the local authority's
//! loader and this pipeline. The loader owns the table and fills
//! `json_payload`, `previous_json_payload`, the content hashes and
//! `row_state`; Hermes reads those columns and writes back
//! `partial_json_payload` and the submission bookkeeping columns.
//!
//! The [`StagingStore`] trait keeps the pipeline independent of the
//! concrete database. [`PostgresStagingStore`] is the production
//! implementation.

pub mod postgres;
pub mod store;

pub use postgres::PostgresStagingStore;
pub use store::{StagingCounts, StagingStore};
