//! Merge-patch helpers for partial profile updates.
//!
//! Update maps use dotted-path keys (`"profile.grade"`), which are expanded
//! into nested structure before a recursive last-write-wins merge. The merge
//! never touches paths the update map does not name.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Partial update keyed by dotted paths into the stored document.
pub type UpdateMap = BTreeMap<String, Value>;

/// Expands dotted-path keys into a nested JSON object, e.g.
/// `{"profile.grade": "A"}` becomes `{"profile": {"grade": "A"}}`.
pub fn expand_dotted_paths(updates: &UpdateMap) -> Value {
    let mut root = Map::new();
    for (path, value) in updates {
        insert_path(&mut root, path, value.clone());
    }
    Value::Object(root)
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let mut current = root;
    for segment in &segments[..segments.len() - 1] {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        // An intermediate leaf is replaced by an object so the path can land.
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(map) = entry else {
            unreachable!()
        };
        current = map;
    }
    current.insert(segments[segments.len() - 1].to_string(), value);
}

/// Recursive merge with last-write-wins semantics per leaf path. Objects merge
/// key-by-key; any other pairing replaces the target wholesale.
pub fn deep_merge(target: &mut Value, patch: Value) {
    match (&mut *target, patch) {
        (Value::Object(base), Value::Object(additions)) => {
            for (key, value) in additions {
                match base.get_mut(&key) {
                    Some(slot) if slot.is_object() && value.is_object() => {
                        deep_merge(slot, value);
                    }
                    Some(slot) => *slot = value,
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Applies a dotted-path update map to an existing document. A non-object
/// existing value (including the empty case) starts from an empty object.
pub fn apply_updates(mut existing: Value, updates: &UpdateMap) -> Value {
    if !existing.is_object() {
        existing = Value::Object(Map::new());
    }
    deep_merge(&mut existing, expand_dotted_paths(updates));
    existing
}
