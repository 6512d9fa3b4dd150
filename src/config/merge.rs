//! Recursive merge of JSON values.
//!
//! Objects merge key by key. Every other combination replaces the base value
//! with the patch value, arrays and `null` included.

use serde_json::Value;

/// Merges `patch` into `base` in place.
///
/// For each key of `patch`:
/// - both sides objects: merged recursively
/// - key missing from `base`: inserted
/// - anything else: the patch value replaces the base value
///
/// A non-object `patch` replaces `base` outright, even when `base` is an object.
///
/// # Example
///
/// ```
/// use reaccoon::config::merge_values;
/// use serde_json::json;
///
/// let mut base = json!({ "threshold": 0.6, "keys": { "weight": 1 } });
/// merge_values(&mut base, json!({ "keys": { "limit": 5 } }));
/// assert_eq!(base, json!({ "threshold": 0.6, "keys": { "weight": 1, "limit": 5 } }));
/// ```
pub fn merge_values(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, incoming) in patch_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, incoming),
                    None => {
                        base_map.insert(key, incoming);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

/// Shallow merge: top-level keys of `overrides` win over `defaults`.
///
/// Used to lay call-site search options over configured defaults. Non-object
/// inputs follow the same rule as [`merge_values`]: the override replaces.
#[must_use]
pub fn overlay(defaults: &Value, overrides: &Value) -> Value {
    match (defaults, overrides) {
        (Value::Object(defaults), Value::Object(overrides)) => {
            let mut merged = defaults.clone();
            for (key, value) in overrides {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        (_, overrides) => overrides.clone(),
    }
}
