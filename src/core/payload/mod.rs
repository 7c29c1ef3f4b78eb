//! Outbound payload construction

pub mod builder;

pub use builder::{build_deletion, build_partial, ANCHOR_FIELDS};
