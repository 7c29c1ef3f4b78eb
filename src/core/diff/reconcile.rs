//! List reconciliation
//!
//! Lists of sub-records (episodes, plans, assessments) are reconciled item by
//! item against the previous baseline so that only changed or newly
//! introduced items travel in the partial payload. Items that vanished from
//! the current list are never emitted; removal is expressed at record level
//! via a deletion payload.

use super::engine::{DiffEngine, DiffStats};
use serde_json::Value;
use tracing::warn;

impl DiffEngine {
    /// Prunes unchanged items from a differing list pair
    ///
    /// For each item in `current`, the first previous item with the same
    /// identifier value is its baseline:
    /// - no identifier, non-object item, or no baseline found: the item is
    ///   new and is included whole
    /// - baseline found and the item diff is empty: the item is unchanged and
    ///   is omitted
    /// - baseline found and the item diff is non-empty: the diff is included,
    ///   with the identifier field re-inserted and, for purge-eligible
    ///   blocks, an explicit `purge = false` marker
    ///
    /// `block` is the document key the list lives under, e.g.
    /// `social_care_episodes`; it selects the identifier field and decides
    /// purge eligibility.
    pub fn reconcile(
        &self,
        block: &str,
        current: &[Value],
        previous: &[Value],
        stats: &mut DiffStats,
    ) -> Vec<Value> {
        stats.list_reconciliations += 1;
        let mut pruned = Vec::new();

        for item in current {
            let item_map = match item.as_object() {
                Some(map) => map,
                None => {
                    pruned.push(item.clone());
                    continue;
                }
            };

            let id_field = match self.identifier_field(block, item_map) {
                Some(field) => field,
                None => {
                    pruned.push(item.clone());
                    continue;
                }
            };
            let id_value = &item_map[id_field];

            let baseline = match self.find_baseline(block, id_field, id_value, previous, stats) {
                Some(prev_item) => prev_item,
                None => {
                    pruned.push(item.clone());
                    continue;
                }
            };

            let item_delta = self.diff(item, baseline, stats);
            let mut delta_map = match item_delta {
                Value::Object(map) if map.is_empty() => continue,
                Value::Object(map) => map,
                other => {
                    // Items are objects here, so the diff is always an
                    // object; keep the value as a guard against regressions.
                    pruned.push(other);
                    continue;
                }
            };

            // The identifier matched, so it never appears in the delta on
            // its own. Re-insert it so the server can address the item,
            // after the changed fields.
            delta_map.insert(id_field.to_string(), id_value.clone());
            if self.is_purge_block(block) {
                delta_map.insert("purge".to_string(), Value::Bool(false));
            }
            pruned.push(Value::Object(delta_map));
        }

        pruned
    }

    /// First previous item whose identifier value matches
    ///
    /// Duplicate identifier values in `previous` are counted and logged;
    /// the first occurrence still wins.
    fn find_baseline<'a>(
        &self,
        block: &str,
        id_field: &str,
        id_value: &Value,
        previous: &'a [Value],
        stats: &mut DiffStats,
    ) -> Option<&'a Value> {
        let mut matched: Option<&Value> = None;
        let mut occurrences = 0usize;

        for prev_item in previous {
            let prev_map = match prev_item.as_object() {
                Some(map) => map,
                None => continue,
            };
            if prev_map.get(id_field) == Some(id_value) {
                occurrences += 1;
                if matched.is_none() {
                    matched = Some(prev_item);
                }
            }
        }

        if occurrences > 1 {
            stats.duplicate_identifiers += 1;
            warn!(
                block = block,
                identifier = %id_value,
                occurrences = occurrences,
                "Duplicate identifier in previous list, first match wins"
            );
        }

        matched
    }
}
