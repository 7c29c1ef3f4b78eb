//! Structural JSON diff
//!
//! This module implements the forward-only, current-wins diff between the
//! current document and the previously submitted baseline. Output key order
//! follows the current document's key order, which is why `serde_json` is
//! built with `preserve_order`.

use crate::config::DiffConfig;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Counters accumulated across one diff traversal
///
/// Callers create one per record (or per pass) and pass it down by mutable
/// reference; there is no module-level state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    /// Object pairs compared during recursion
    pub object_diffs: usize,
    /// Differing list pairs handed to reconciliation
    pub list_reconciliations: usize,
    /// Current items whose identifier matched more than one previous item
    pub duplicate_identifiers: usize,
}

impl DiffStats {
    /// Folds another traversal's counters into this one
    pub fn absorb(&mut self, other: DiffStats) {
        self.object_diffs += other.object_diffs;
        self.list_reconciliations += other.list_reconciliations;
        self.duplicate_identifiers += other.duplicate_identifiers;
    }
}

/// Structural diff engine for child-record documents
///
/// Holds the per-block identifier map and the purge-eligible block list.
/// The engine is immutable after construction and safe to share across
/// records.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    identifier_fields: HashMap<String, String>,
    purge_blocks: HashSet<String>,
}

impl DiffEngine {
    /// Creates an engine from diff configuration
    pub fn new(config: &DiffConfig) -> Self {
        Self {
            identifier_fields: config.identifier_fields.clone(),
            purge_blocks: config.purge_blocks.iter().cloned().collect(),
        }
    }

    /// Computes the minimal change-set between `current` and `previous`
    ///
    /// The diff walks `current`'s keys in order and compares each against
    /// `previous`:
    /// - nested objects on both sides recurse, and the key is included only
    ///   when the nested diff is non-empty
    /// - arrays on both sides that differ are handed to list reconciliation,
    ///   and the key is always included even when reconciliation prunes every
    ///   item
    /// - any other difference (scalar change, type change, key missing from
    ///   `previous`) includes `current`'s value verbatim
    ///
    /// Keys present only in `previous` are never emitted; record-level
    /// deletion is expressed elsewhere, not field-level.
    ///
    /// When either input is not an object the result is an empty object for
    /// equal values, or `current`'s value otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use hermes::config::DiffConfig;
    /// use hermes::core::diff::{DiffEngine, DiffStats};
    /// use serde_json::json;
    ///
    /// let engine = DiffEngine::new(&DiffConfig::default());
    /// let mut stats = DiffStats::default();
    /// let delta = engine.diff(
    ///     &json!({"a": 1, "b": {"x": 1}}),
    ///     &json!({"a": 1, "b": {"x": 2}}),
    ///     &mut stats,
    /// );
    /// assert_eq!(delta, json!({"b": {"x": 1}}));
    /// ```
    pub fn diff(&self, current: &Value, previous: &Value, stats: &mut DiffStats) -> Value {
        let (curr_map, prev_map) = match (current, previous) {
            (Value::Object(c), Value::Object(p)) => (c, p),
            _ => {
                return if current == previous {
                    Value::Object(Map::new())
                } else {
                    current.clone()
                };
            }
        };

        stats.object_diffs += 1;
        let mut delta = Map::new();

        for (key, curr_val) in curr_map {
            let prev_val = match prev_map.get(key) {
                Some(value) => value,
                None => {
                    delta.insert(key.clone(), curr_val.clone());
                    continue;
                }
            };

            match (curr_val, prev_val) {
                (Value::Object(_), Value::Object(_)) => {
                    let nested = self.diff(curr_val, prev_val, stats);
                    match nested.as_object() {
                        Some(map) if map.is_empty() => {}
                        _ => {
                            delta.insert(key.clone(), nested);
                        }
                    }
                }
                (Value::Array(curr_items), Value::Array(prev_items)) => {
                    if curr_items != prev_items {
                        let pruned = self.reconcile(key, curr_items, prev_items, stats);
                        delta.insert(key.clone(), Value::Array(pruned));
                    }
                }
                _ => {
                    if curr_val != prev_val {
                        delta.insert(key.clone(), curr_val.clone());
                    }
                }
            }
        }

        Value::Object(delta)
    }

    /// Identifier field for an item of the named list block
    ///
    /// The configured mapping wins when the item carries that field;
    /// otherwise the first key (in item order) ending in `_id` is used.
    /// Returns `None` when neither applies.
    pub(crate) fn identifier_field<'a>(
        &'a self,
        block: &str,
        item: &'a Map<String, Value>,
    ) -> Option<&'a str> {
        if let Some(configured) = self.identifier_fields.get(block) {
            if item.contains_key(configured) {
                return Some(configured.as_str());
            }
        }
        item.keys().find(|k| k.ends_with("_id")).map(String::as_str)
    }

    pub(crate) fn is_purge_block(&self, block: &str) -> bool {
        self.purge_blocks.contains(block)
    }
}
