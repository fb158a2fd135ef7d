//! Recursive removal of semantically-empty values from a tree
//!
//! Pruning never mutates its input; it folds the tree into a freshly built
//! value, returning `None` ("absent") for positions that should not exist in
//! the output. Absent is distinct from an explicit `null`, which is only
//! removed when it is a member of the configured empty set.

use serde_json::{Map, Value};

/// The default empty set: explicit `null` values
///
/// The source data model also has an undefined-equivalent; both collapse to
/// `Null` in this representation.
pub fn default_empties() -> Vec<Value> {
    vec![Value::Null]
}

/// Recursively remove values considered empty from a tree.
///
/// * Members of `empties` become absent.
/// * Arrays and objects are pruned element-wise, dropping absent children;
///   collections left empty by pruning are themselves dropped unless
///   `keep_empty_collections` is set.
/// * Any other scalar is returned unchanged.
///
/// Callers in the reconciliation pipeline pass
/// `keep_empty_collections = true`.
pub fn prune(tree: &Value, empties: &[Value], keep_empty_collections: bool) -> Option<Value> {
    if empties.iter().any(|empty| tree == empty) {
        return None;
    }
    match tree {
        Value::Array(items) => {
            let kept: Vec<Value> = items
                .iter()
                .filter_map(|item| prune(item, empties, keep_empty_collections))
                .collect();
            if kept.is_empty() && !keep_empty_collections {
                None
            } else {
                Some(Value::Array(kept))
            }
        }
        Value::Object(fields) => {
            let kept: Map<String, Value> = fields
                .iter()
                .filter_map(|(key, value)| {
                    prune(value, empties, keep_empty_collections)
                        .map(|pruned| (key.clone(), pruned))
                })
                .collect();
            if kept.is_empty() && !keep_empty_collections {
                None
            } else {
                Some(Value::Object(kept))
            }
        }
        scalar => Some(scalar.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_pass_through() {
        let empties = default_empties();
        assert_eq!(prune(&json!(42), &empties, true), Some(json!(42)));
        assert_eq!(prune(&json!("x"), &empties, true), Some(json!("x")));
        assert_eq!(prune(&json!(false), &empties, true), Some(json!(false)));
        assert_eq!(prune(&Value::Null, &empties, true), None);
    }

    #[test]
    fn test_empty_collection_retention() {
        let empties = default_empties();
        let tree = json!({"a": null, "b": []});
        assert_eq!(prune(&tree, &empties, true), Some(json!({"b": []})));
        assert_eq!(prune(&tree, &empties, false), None);

        let tree = json!({"a": null, "b": [1]});
        assert_eq!(prune(&tree, &empties, true), Some(json!({"b": [1]})));
        assert_eq!(prune(&tree, &empties, false), Some(json!({"b": [1]})));
    }

    #[test]
    fn test_nested_removal() {
        let empties = default_empties();
        let tree = json!({"outer": {"inner": null, "kept": "v"}, "list": [null, 1, null]});
        assert_eq!(
            prune(&tree, &empties, true),
            Some(json!({"outer": {"kept": "v"}, "list": [1]}))
        );
    }

    #[test]
    fn test_custom_empty_set() {
        let empties = vec![Value::Null, json!("")];
        let tree = json!({"a": "", "b": "x"});
        assert_eq!(prune(&tree, &empties, true), Some(json!({"b": "x"})));
    }

    #[test]
    fn test_pruning_is_idempotent() {
        let empties = default_empties();
        for keep in [true, false] {
            let tree = json!({
                "a": null,
                "b": {"c": [null, {"d": null}], "e": 1},
                "f": []
            });
            let once = prune(&tree, &empties, keep);
            let twice = once
                .as_ref()
                .and_then(|pruned| prune(pruned, &empties, keep));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let empties = default_empties();
        let tree = json!({"a": null, "b": 1});
        let _ = prune(&tree, &empties, true);
        assert_eq!(tree, json!({"a": null, "b": 1}));
    }
}
