use serde_json::{Map, Value};

use super::util::{is_blank, is_empty_container};

/// Label used when no single named top-level key supplies a friendlier one.
pub(super) const GENERIC_ROOT_LABEL: &str = "root";

/// Root-leaf id used after an empty-keyed wrapper level has been collapsed away.
pub(super) const EMPTY_ROOT_FALLBACK_ID: &str = "data-root";

/// The document the builder actually walks, after top-level normalization.
pub(super) enum EffectiveDoc<'a> {
    Borrowed(&'a Map<String, Value>),
    /// An empty-keyed wrapper around an array collapses into an index-keyed map, matching how a
    /// dynamic runtime enumerates array indices as own keys.
    Indexed(Map<String, Value>),
}

impl EffectiveDoc<'_> {
    pub(super) fn map(&self) -> &Map<String, Value> {
        match self {
            EffectiveDoc::Borrowed(map) => map,
            EffectiveDoc::Indexed(map) => map,
        }
    }
}

pub(super) struct NormalizedInput<'a> {
    pub(super) doc: EffectiveDoc<'a>,
    pub(super) root_label: &'a str,
    pub(super) skip_empty_root: bool,
}

/// Decides what the builder walks and what the root is called.
///
/// - `{"": {...}}` collapses one meaningless wrapping level (the visual root falls back to
///   [`EMPTY_ROOT_FALLBACK_ID`] if it ends up holding primitive content);
/// - `{"config": {...}}` keeps the document as-is but uses `config` as the root label;
/// - everything else keeps the document and the generic `root` label.
///
/// Returns `None` for input that cannot produce a graph at all (non-object, array, null, empty).
pub(super) fn normalize_input(input: &Value) -> Option<NormalizedInput<'_>> {
    let Value::Object(map) = input else {
        return None;
    };
    if map.is_empty() {
        return None;
    }

    if map.len() == 1 {
        let (key, value) = map.iter().next()?;
        match value {
            Value::Object(inner) if is_blank(key) => {
                return Some(NormalizedInput {
                    doc: EffectiveDoc::Borrowed(inner),
                    root_label: GENERIC_ROOT_LABEL,
                    skip_empty_root: true,
                });
            }
            Value::Array(items) if is_blank(key) => {
                return Some(NormalizedInput {
                    doc: EffectiveDoc::Indexed(index_keyed(items)),
                    root_label: GENERIC_ROOT_LABEL,
                    skip_empty_root: true,
                });
            }
            Value::Object(_) | Value::Array(_) => {
                return Some(NormalizedInput {
                    doc: EffectiveDoc::Borrowed(map),
                    root_label: key.as_str(),
                    skip_empty_root: false,
                });
            }
            _ => {}
        }
    }

    Some(NormalizedInput {
        doc: EffectiveDoc::Borrowed(map),
        root_label: GENERIC_ROOT_LABEL,
        skip_empty_root: false,
    })
}

fn index_keyed(items: &[Value]) -> Map<String, Value> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| (index.to_string(), item.clone()))
        .collect()
}

/// Own entries split into primitive-valued and nested-valued, original order preserved.
///
/// `null` counts as primitive; empty containers land in neither bucket (they are invisible to
/// both node emission and the direct-attach decision).
pub(super) struct KeyPartition<'a> {
    pub(super) primitive: Vec<(&'a str, &'a Value)>,
    pub(super) nested: Vec<(&'a str, &'a Value)>,
}

pub(super) fn partition_entries(map: &Map<String, Value>) -> KeyPartition<'_> {
    let mut primitive = Vec::new();
    let mut nested = Vec::new();
    for (key, value) in map {
        if value.is_object() || value.is_array() {
            if !is_empty_container(value) {
                nested.push((key.as_str(), value));
            }
        } else {
            primitive.push((key.as_str(), value));
        }
    }
    KeyPartition { primitive, nested }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object_roots() {
        assert!(normalize_input(&json!(null)).is_none());
        assert!(normalize_input(&json!([1, 2])).is_none());
        assert!(normalize_input(&json!("text")).is_none());
        assert!(normalize_input(&json!({})).is_none());
    }

    #[test]
    fn empty_key_wrapper_is_collapsed() {
        let input = json!({"": {"a": 1}});
        let normalized = normalize_input(&input).unwrap();
        assert!(normalized.skip_empty_root);
        assert_eq!(normalized.root_label, GENERIC_ROOT_LABEL);
        assert_eq!(normalized.doc.map().len(), 1);
        assert!(normalized.doc.map().contains_key("a"));
    }

    #[test]
    fn whitespace_only_key_counts_as_empty() {
        let input = json!({"   ": {"a": 1}});
        let normalized = normalize_input(&input).unwrap();
        assert!(normalized.skip_empty_root);
    }

    #[test]
    fn empty_key_array_wrapper_is_indexed() {
        let input = json!({"": [10, 20]});
        let normalized = normalize_input(&input).unwrap();
        assert!(normalized.skip_empty_root);
        let map = normalized.doc.map();
        assert_eq!(map.get("0"), Some(&json!(10)));
        assert_eq!(map.get("1"), Some(&json!(20)));
    }

    #[test]
    fn single_named_container_key_becomes_the_root_label() {
        let input = json!({"config": {"x": 1}});
        let normalized = normalize_input(&input).unwrap();
        assert!(!normalized.skip_empty_root);
        assert_eq!(normalized.root_label, "config");
        // Not unwrapped: the labeled key is still part of the walked document.
        assert!(normalized.doc.map().contains_key("config"));
    }

    #[test]
    fn single_primitive_key_keeps_the_generic_label() {
        let input = json!({"only": 1});
        let normalized = normalize_input(&input).unwrap();
        assert_eq!(normalized.root_label, GENERIC_ROOT_LABEL);
        assert!(!normalized.skip_empty_root);
    }

    #[test]
    fn partition_preserves_order_and_drops_empty_containers() {
        let map = json!({
            "z": 1,
            "nested": {"a": 1},
            "gone": {},
            "also_gone": [],
            "flag": null,
            "list": [1],
        });
        let Value::Object(map) = map else {
            unreachable!()
        };
        let parts = partition_entries(&map);
        let primitive: Vec<&str> = parts.primitive.iter().map(|(key, _)| *key).collect();
        let nested: Vec<&str> = parts.nested.iter().map(|(key, _)| *key).collect();
        assert_eq!(primitive, vec!["z", "flag"]);
        assert_eq!(nested, vec!["nested", "list"]);
    }
}
