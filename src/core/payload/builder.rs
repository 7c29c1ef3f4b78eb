//! Partial and deletion payload construction
//!
//! A partial payload is what actually travels to the API for an updated
//! record: the identifying anchor fields copied verbatim from the current
//! document, plus the diffed change-set merged over them. A deletion payload
//! is the minimal purge instruction for a record that left the cohort.

use crate::core::diff::{DiffEngine, DiffStats};
use serde_json::{Map, Value};

/// Fields copied verbatim from the current document into every partial
/// payload. The server requires them to address the child even when they
/// did not change.
pub const ANCHOR_FIELDS: [&str; 3] = ["la_child_id", "mis_child_id", "child_details"];

/// Builds a partial payload from the current document and its baseline
///
/// The payload starts with the anchor fields (`la_child_id`, `mis_child_id`,
/// `child_details`) copied from `current` when present, then merges every
/// top-level key of the diff that is not already present. Anchors are never
/// overwritten by diffed values, so a changed `child_details` still travels
/// in full.
///
/// # Examples
///
/// ```
/// use hermes::config::DiffConfig;
/// use hermes::core::diff::DiffEngine;
/// use hermes::core::payload::build_partial;
/// use serde_json::json;
///
/// let engine = DiffEngine::new(&DiffConfig::default());
/// let current = json!({
///     "la_child_id": "C1",
///     "mis_child_id": "M1",
///     "child_details": {"first_name": "Ada"},
///     "health_and_wellbeing": {"sdq_assessments": [], "purge": false}
/// });
/// let mut previous = current.clone();
/// previous["health_and_wellbeing"]["purge"] = json!(true);
///
/// let (payload, _stats) = build_partial(&current, &previous, &engine);
/// assert_eq!(payload["la_child_id"], json!("C1"));
/// assert_eq!(payload["health_and_wellbeing"], json!({"purge": false}));
/// ```
pub fn build_partial(
    current: &Value,
    previous: &Value,
    engine: &DiffEngine,
) -> (Value, DiffStats) {
    let mut stats = DiffStats::default();
    let delta = engine.diff(current, previous, &mut stats);

    let mut payload = Map::new();
    for field in ANCHOR_FIELDS {
        if let Some(value) = current.get(field) {
            payload.insert(field.to_string(), value.clone());
        }
    }

    if let Value::Object(delta_map) = delta {
        for (key, value) in delta_map {
            if !payload.contains_key(&key) {
                payload.insert(key, value);
            }
        }
    }

    (Value::Object(payload), stats)
}

/// Builds the deletion payload for a record that left the cohort
///
/// The payload is exactly the two child identifiers and `purge = true`,
/// taken from the previously submitted document. Absent identifiers become
/// JSON null; nothing else from `previous` is carried regardless of how
/// rich it is.
pub fn build_deletion(previous: &Value) -> Value {
    let mut payload = Map::new();
    for field in ["la_child_id", "mis_child_id"] {
        let value = previous.get(field).cloned().unwrap_or(Value::Null);
        payload.insert(field.to_string(), value);
    }
    payload.insert("purge".to_string(), Value::Bool(true));
    Value::Object(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffConfig;
    use serde_json::json;

    fn engine() -> DiffEngine {
        DiffEngine::new(&DiffConfig::default())
    }

    fn sample_current() -> Value {
        json!({
            "la_child_id": "C1",
            "mis_child_id": "M1",
            "child_details": {
                "first_name": "Ada",
                "unique_pupil_number": "A123456789012",
                "purge": false
            },
            "health_and_wellbeing": {
                "sdq_assessments": [{"date": "2025-04-01", "score": 12}],
                "purge": false
            },
            "social_care_episodes": [
                {"social_care_episode_id": "E1", "referral_source": "1A"}
            ],
            "purge": false
        })
    }

    #[test]
    fn test_partial_merges_diff_over_anchors() {
        let current = sample_current();
        let mut previous = current.clone();
        previous["social_care_episodes"][0]["referral_source"] = json!("1B");

        let (payload, stats) = build_partial(&current, &previous, &engine());

        assert_eq!(payload["la_child_id"], json!("C1"));
        assert_eq!(payload["mis_child_id"], json!("M1"));
        assert_eq!(payload["child_details"], current["child_details"]);
        assert_eq!(
            payload["social_care_episodes"],
            json!([
                {"referral_source": "1A", "social_care_episode_id": "E1", "purge": false}
            ])
        );
        // Unchanged blocks do not travel.
        assert!(payload.get("health_and_wellbeing").is_none());
        assert!(stats.object_diffs > 0);
    }

    #[test]
    fn test_partial_of_identical_documents_is_anchors_only() {
        let current = sample_current();

        let (payload, _stats) = build_partial(&current, &current, &engine());

        let map = payload.as_object().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(payload["la_child_id"], json!("C1"));
        assert_eq!(payload["mis_child_id"], json!("M1"));
        assert_eq!(payload["child_details"], current["child_details"]);
    }

    #[test]
    fn test_anchors_are_never_overwritten_by_diff() {
        let current = sample_current();
        let mut previous = current.clone();
        previous["child_details"]["first_name"] = json!("Grace");

        let (payload, _stats) = build_partial(&current, &previous, &engine());

        // The diff would carry a pruned child_details; the anchor copy wins.
        assert_eq!(payload["child_details"], current["child_details"]);
    }

    #[test]
    fn test_partial_skips_absent_anchor() {
        let current = json!({"la_child_id": "C1", "purge": false});
        let previous = json!({"la_child_id": "C1", "purge": true});

        let (payload, _stats) = build_partial(&current, &previous, &engine());

        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"la_child_id":"C1","purge":false}"#
        );
    }

    #[test]
    fn test_anchor_order_precedes_diff_keys() {
        let current = sample_current();
        let mut previous = current.clone();
        previous["purge"] = json!(true);

        let (payload, _stats) = build_partial(&current, &previous, &engine());

        let keys: Vec<&str> = payload
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec!["la_child_id", "mis_child_id", "child_details", "purge"]
        );
    }

    #[test]
    fn test_partial_build_is_deterministic() {
        let current = sample_current();
        let mut previous = current.clone();
        previous["social_care_episodes"][0]["referral_source"] = json!("1B");

        let (first, _) = build_partial(&current, &previous, &engine());
        let (second, _) = build_partial(&current, &previous, &engine());

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_deletion_payload_shape() {
        let previous = sample_current();

        let payload = build_deletion(&previous);

        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"la_child_id":"C1","mis_child_id":"M1","purge":true}"#
        );
    }

    #[test]
    fn test_deletion_payload_with_absent_identifiers() {
        let payload = build_deletion(&json!({"child_details": {}}));

        assert_eq!(payload["la_child_id"], Value::Null);
        assert_eq!(payload["mis_child_id"], Value::Null);
        assert_eq!(payload["purge"], json!(true));
    }
}
