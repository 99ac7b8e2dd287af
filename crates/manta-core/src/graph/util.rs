use serde_json::Value;

/// Case-normalizes a key/path segment into a display-safe id.
///
/// Split on `-`, then split each part on `_`; every underscore segment after the first is
/// capitalized (first letter upper, rest lower) while the first segment is kept as-is. Parts
/// rejoin with `_` removed and `-` preserved. Idempotent: normalized ids pass through unchanged,
/// so composed ids like `<parent>-<key>` can be re-normalized safely.
pub(crate) fn normalize_node_id(input: &str) -> String {
    input
        .split('-')
        .map(|part| {
            part.split('_')
                .enumerate()
                .map(|(index, word)| {
                    if index == 0 {
                        word.to_string()
                    } else {
                        capitalize(word)
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Structural child count shown in a container's `{N}` badge.
///
/// Arrays count their elements. Objects count: 1 for the merged primitive leaf (if any primitive
/// own property exists), plus one per array-valued property, plus one per object-valued property.
/// This is a summary of the children a container will render, not a literal field count.
pub(crate) fn child_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(map) => {
            let has_primitives = map
                .values()
                .any(|entry| !entry.is_object() && !entry.is_array());
            let arrays = map.values().filter(|entry| entry.is_array()).count();
            let objects = map.values().filter(|entry| entry.is_object()).count();
            usize::from(has_primitives) + arrays + objects
        }
        _ => 0,
    }
}

/// Empty containers (`{}` and `[]`) are invisible: no node, no recursion.
pub(crate) fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Annotation text for a primitive value; `null` renders as an empty fragment.
pub(crate) fn annotation_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => display_text(other),
    }
}

/// Human-readable text for a value in `"key: value"` lines and array-element leaves.
///
/// Mirrors how a dynamic-language renderer stringifies values: `null` spells itself out in line
/// context, arrays join their element texts with `,` (nulls blank), and objects collapse to the
/// classic opaque placeholder.
pub(crate) fn display_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(array_element_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn array_element_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => display_text(other),
    }
}

/// Formats a JSON number the way script runtimes do (`1.5`, not `1.5000000000000002`-style
/// artifacts), so annotation text is stable across the language boundary.
pub(crate) fn number_text(number: &serde_json::Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(int) = number.as_u64() {
        return int.to_string();
    }
    match number.as_f64() {
        Some(float) => {
            let mut buffer = ryu_js::Buffer::new();
            buffer.format_finite(float).to_string()
        }
        None => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_capitalizes_underscore_segments_after_the_first() {
        assert_eq!(normalize_node_id("user_name"), "userName");
        assert_eq!(normalize_node_id("deeply_nested_key"), "deeplyNestedKey");
        assert_eq!(normalize_node_id("plain"), "plain");
        assert_eq!(normalize_node_id(""), "");
    }

    #[test]
    fn normalize_preserves_hyphens_and_first_segment_case() {
        assert_eq!(normalize_node_id("a-b_c"), "a-bC");
        assert_eq!(normalize_node_id("data-root"), "data-root");
        assert_eq!(normalize_node_id("HTTP_status"), "HTTPStatus");
    }

    #[test]
    fn normalize_lowercases_the_tail_of_later_segments() {
        assert_eq!(normalize_node_id("a_BC"), "aBc");
    }

    #[test]
    fn normalize_is_idempotent_on_composed_ids() {
        let once = normalize_node_id("order_items-0-line_total");
        assert_eq!(normalize_node_id(&once), once);
    }

    #[test]
    fn child_count_follows_the_badge_rule() {
        assert_eq!(child_count(&json!([1, 2, 3])), 3);
        assert_eq!(child_count(&json!({})), 0);
        assert_eq!(child_count(&json!({"a": 1, "b": 2})), 1);
        assert_eq!(child_count(&json!({"a": 1, "b": [1], "c": {"d": 2}})), 3);
        assert_eq!(child_count(&json!({"a": null})), 1);
        assert_eq!(child_count(&json!(42)), 0);
    }

    #[test]
    fn empty_containers_are_detected() {
        assert!(is_empty_container(&json!({})));
        assert!(is_empty_container(&json!([])));
        assert!(!is_empty_container(&json!({"a": 1})));
        assert!(!is_empty_container(&json!(null)));
    }

    #[test]
    fn display_text_matches_dynamic_string_coercion() {
        assert_eq!(display_text(&json!(null)), "null");
        assert_eq!(display_text(&json!(true)), "true");
        assert_eq!(display_text(&json!(1.5)), "1.5");
        assert_eq!(display_text(&json!("x")), "x");
        assert_eq!(display_text(&json!([1, "a", null])), "1,a,");
        assert_eq!(display_text(&json!([[1, 2], 3])), "1,2,3");
        assert_eq!(display_text(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn annotation_text_blanks_null() {
        assert_eq!(annotation_text(&json!(null)), "");
        assert_eq!(annotation_text(&json!(0)), "0");
    }
}
