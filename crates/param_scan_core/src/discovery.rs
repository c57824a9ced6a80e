//! Axis discovery over nested variable-value structures.
//!
//! Every array leaf becomes one [`ScanAxis`]; objects are descended into.
//! Axes come out in the structure's key order, which fixes the order in which
//! combinations are later produced.

use serde_json::Value;

use crate::contract::{value_kind, AxisKind, ScanAxis, StateMap};
use crate::error::{ScanError, ScanResult};

/// Walks `structure` and returns one axis per array leaf, each rooted at `base_path`.
///
/// `base_path` is owned and extended per branch, so sibling branches never share
/// path state.
pub fn discover(
    base_path: Vec<String>,
    structure: &StateMap,
    kind: AxisKind,
) -> ScanResult<Vec<ScanAxis>> {
    let mut axes = Vec::new();
    for (key, value) in structure {
        let mut path = base_path.clone();
        path.push(key.clone());
        match value {
            Value::Object(nested) => axes.extend(discover(path, nested, kind)?),
            Value::Array(values) => axes.push(ScanAxis::new(path, values.clone(), kind)?),
            other => {
                return Err(ScanError::TypeConflict {
                    key: key.clone(),
                    path,
                    found: value_kind(other),
                    structure: Value::Object(structure.clone()).to_string(),
                });
            }
        }
    }
    Ok(axes)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> StateMap {
        value.as_object().cloned().expect("test value should be an object")
    }

    #[test]
    fn discover_emits_one_axis_per_array_leaf_in_key_order() {
        let structure = object(json!({
            "species_concentrations": {"PX": [1, 30000], "PY": [1, 2000]},
            "volume": [1.0, 2.0, 3.0],
        }));

        let axes = discover(Vec::new(), &structure, AxisKind::State).expect("discovery");

        let paths: Vec<Vec<String>> = axes.iter().map(|axis| axis.path().to_vec()).collect();
        assert_eq!(
            paths,
            vec![
                vec!["species_concentrations".to_string(), "PX".to_string()],
                vec!["species_concentrations".to_string(), "PY".to_string()],
                vec!["volume".to_string()],
            ]
        );
        assert_eq!(axes[2].values(), &[json!(1.0), json!(2.0), json!(3.0)]);
        assert!(axes.iter().all(|axis| axis.kind() == AxisKind::State));
    }

    #[test]
    fn discover_preserves_insertion_order_over_sorted_order() {
        let structure = object(json!({"zeta": [1], "alpha": [2], "mid": {"b": [3], "a": [4]}}));

        let axes = discover(Vec::new(), &structure, AxisKind::Config).expect("discovery");
        let leaves: Vec<String> = axes.iter().map(|axis| axis.path().join(".")).collect();

        assert_eq!(leaves, vec!["zeta", "alpha", "mid.b", "mid.a"]);
    }

    #[test]
    fn discover_prefixes_base_path() {
        let structure = object(json!({"tolerance": [1e-6, 1e-8]}));

        let axes = discover(vec!["solver".to_string()], &structure, AxisKind::Config)
            .expect("discovery");

        assert_eq!(axes.len(), 1);
        assert_eq!(axes[0].path(), &["solver".to_string(), "tolerance".to_string()]);
    }

    #[test]
    fn discover_empty_structure_yields_no_axes() {
        let axes = discover(Vec::new(), &StateMap::new(), AxisKind::State).expect("discovery");
        assert!(axes.is_empty());
    }

    #[test]
    fn discover_rejects_scalar_leaf() {
        let structure = object(json!({"species_concentrations": {"PX": 5}}));

        let error = discover(Vec::new(), &structure, AxisKind::State).expect_err("should fail");

        match error {
            ScanError::TypeConflict {
                key, path, found, ..
            } => {
                assert_eq!(key, "PX");
                assert_eq!(path, vec!["species_concentrations", "PX"]);
                assert_eq!(found, "number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn discover_rejects_empty_list_leaf() {
        let structure = object(json!({"PX": []}));

        let error = discover(Vec::new(), &structure, AxisKind::State).expect_err("should fail");

        assert_eq!(
            error,
            ScanError::EmptyAxisValues {
                path: vec!["PX".to_string()]
            }
        );
    }

    #[test]
    fn discover_is_idempotent() {
        let structure = object(json!({"a": {"b": [1, 2], "c": {"d": ["x"]}}, "e": [true, false]}));

        let first = discover(Vec::new(), &structure, AxisKind::State).expect("discovery");
        let second = discover(Vec::new(), &structure, AxisKind::State).expect("discovery");

        assert_eq!(first, second);
    }
}
