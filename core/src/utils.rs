//! # JSON Utilities

use serde_json::{Map, Value};

/// Recursively merges `second` into `first`; `second` wins on leaf collisions.
///
/// Nested objects are merged key by key. Any other value (arrays included)
/// replaces what was there.
pub fn merge(first: &Value, second: &Value) -> Value {
    match (first, second) {
        (Value::Object(a), Value::Object(b)) => Value::Object(merge_maps(a, b)),
        (_, b) => b.clone(),
    }
}

/// [`merge`] for two objects.
pub fn merge_maps(first: &Map<String, Value>, second: &Map<String, Value>) -> Map<String, Value> {
    let mut result = first.clone();
    for (key, value) in second {
        let merged = match result.get(key) {
            Some(existing @ Value::Object(_)) => merge(existing, value),
            _ => value.clone(),
        };
        result.insert(key.clone(), merged);
    }
    result
}

/// Drops every `null` member, recursing into objects and arrays of objects.
pub fn not_none(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, not_none(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(not_none).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_simple_objects() {
        let first = json!({"a": 1, "b": 2});
        let second = json!({"b": 3, "c": 4});
        assert_eq!(merge(&first, &second), json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_merge_recursive() {
        let first = json!({"a": {"x": 1, "y": 2}, "keep": true});
        let second = json!({"a": {"y": 3, "z": 4}});
        assert_eq!(
            merge(&first, &second),
            json!({"a": {"x": 1, "y": 3, "z": 4}, "keep": true})
        );
    }

    #[test]
    fn test_merge_replaces_arrays() {
        let first = json!({"a": [1, 2]});
        let second = json!({"a": [3]});
        assert_eq!(merge(&first, &second), json!({"a": [3]}));
    }

    #[test]
    fn test_merge_keeps_key_order_of_first() {
        let merged = merge(&json!({"a": 1, "b": 2}), &json!({"c": 3, "a": 4}));
        let keys: Vec<_> = merged.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_not_none() {
        let data = json!({"a": null, "b": 1, "c": {"d": null, "e": [null, {"f": null}]}});
        assert_eq!(not_none(data), json!({"b": 1, "c": {"e": [null, {}]}}));
    }
}
