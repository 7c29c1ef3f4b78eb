//! Structural diff between current and previously submitted documents
//!
//! The diff is forward-only and current-wins: it walks the current document,
//! emits changed values verbatim, recurses into nested objects, and hands
//! differing lists to per-item reconciliation. The result is the minimal
//! change-set the partial payload builder merges over the anchor fields.

pub mod engine;
pub mod reconcile;

pub use engine::{DiffEngine, DiffStats};
