//! XML ↔ JSON value transformer.
//!
//! Conversion conventions (fixed; the graph builder only ever sees the resulting value):
//! - attributes become plain object properties, no prefix;
//! - a single child element becomes an object property, repeated siblings become an array;
//! - boolean/numeric text and attribute content is coerced to the richer type;
//! - an element carrying both attributes and text keeps the text under `#text`;
//! - fragment input is wrapped in a synthetic outer element for well-formedness, and that
//!   wrapper is stripped again before the value is handed on.

use serde_json::{Map, Value};

use crate::graph::util::number_text;
use crate::{Error, Result};

const WRAPPER_ELEMENT: &str = "root";
const TEXT_KEY: &str = "#text";

/// Converts XML text (document or fragment) into a JSON value.
pub fn xml_to_value(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if !trimmed.starts_with('<') {
        return Err(Error::InvalidXml {
            message: "input does not start with an element".to_string(),
        });
    }

    // A leading declaration would make the wrapped fragment ill-formed.
    let body = match trimmed.strip_prefix("<?xml") {
        Some(rest) => rest
            .split_once("?>")
            .map(|(_, tail)| tail.trim_start())
            .unwrap_or(""),
        None => trimmed,
    };

    let wrapped = format!("<{WRAPPER_ELEMENT}>{body}</{WRAPPER_ELEMENT}>");
    let document = roxmltree::Document::parse(&wrapped).map_err(|err| Error::InvalidXml {
        message: err.to_string(),
    })?;

    let value = element_to_value(document.root_element());
    tracing::debug!("converted XML input to a JSON value");
    match value {
        // An empty wrapper (no children, no text) reads as an empty document.
        Value::String(text) if text.is_empty() => Ok(Value::Object(Map::new())),
        other => Ok(other),
    }
}

fn element_to_value(element: roxmltree::Node<'_, '_>) -> Value {
    let mut object = Map::new();
    for attribute in element.attributes() {
        object.insert(
            attribute.name().to_string(),
            coerce_scalar(attribute.value()),
        );
    }

    let mut text = String::new();
    for child in element.children() {
        if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
            continue;
        }
        if !child.is_element() {
            continue;
        }

        let name = child.tag_name().name().to_string();
        let value = element_to_value(child);
        match object.entry(name) {
            serde_json::map::Entry::Vacant(slot) => {
                slot.insert(value);
            }
            serde_json::map::Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(items) => items.push(value),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            },
        }
    }

    let text = text.trim();
    if object.is_empty() {
        return coerce_scalar(text);
    }
    if !text.is_empty() {
        object.insert(TEXT_KEY.to_string(), coerce_scalar(text));
    }
    Value::Object(object)
}

/// Coerces element/attribute text to the richest matching JSON type.
fn coerce_scalar(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            if let Some(number) = serde_json::Number::from_f64(float) {
                return Value::Number(number);
            }
        }
    }
    Value::String(raw.to_string())
}

/// Serializes a JSON value back to indented XML text.
///
/// The inverse of [`xml_to_value`] up to that transform's own lossiness: former attributes come
/// back as child elements, and a top-level object serializes as a fragment of sibling elements
/// (no synthetic wrapper).
pub fn value_to_xml(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                write_element(&mut out, key, child, 0);
            }
        }
        other => out.push_str(&escape_text(&scalar_text(other))),
    }
    out
}

fn write_element(out: &mut String, name: &str, value: &Value, depth: usize) {
    match value {
        Value::Array(items) => {
            for item in items {
                write_element(out, name, item, depth);
            }
        }
        Value::Object(map) => {
            indent(out, depth);
            out.push('<');
            out.push_str(name);
            out.push_str(">\n");
            for (key, child) in map {
                if key == TEXT_KEY {
                    indent(out, depth + 1);
                    out.push_str(&escape_text(&scalar_text(child)));
                    out.push('\n');
                } else {
                    write_element(out, key, child, depth + 1);
                }
            }
            indent(out, depth);
            out.push_str("</");
            out.push_str(name);
            out.push_str(">\n");
        }
        scalar => {
            indent(out, depth);
            let text = scalar_text(scalar);
            if text.is_empty() {
                out.push('<');
                out.push_str(name);
                out.push_str("/>\n");
            } else {
                out.push('<');
                out.push_str(name);
                out.push('>');
                out.push_str(&escape_text(&text));
                out.push_str("</");
                out.push_str(name);
                out.push_str(">\n");
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attributes_become_plain_properties() {
        let value = xml_to_value(r#"<item id="7" active="true" label="x"/>"#).unwrap();
        assert_eq!(
            value,
            json!({"item": {"id": 7, "active": true, "label": "x"}})
        );
    }

    #[test]
    fn single_children_stay_unwrapped_and_repeats_become_arrays() {
        let value = xml_to_value("<list><item>1</item><item>2</item><only>3</only></list>").unwrap();
        assert_eq!(value, json!({"list": {"item": [1, 2], "only": 3}}));
    }

    #[test]
    fn text_content_is_type_coerced() {
        let value = xml_to_value("<a>12</a>").unwrap();
        assert_eq!(value, json!({"a": 12}));

        let value = xml_to_value("<a>1.5</a>").unwrap();
        assert_eq!(value, json!({"a": 1.5}));

        let value = xml_to_value("<a>false</a>").unwrap();
        assert_eq!(value, json!({"a": false}));

        let value = xml_to_value("<a>hello</a>").unwrap();
        assert_eq!(value, json!({"a": "hello"}));
    }

    #[test]
    fn mixed_attributes_and_text_use_the_text_key() {
        let value = xml_to_value(r#"<a unit="px">12</a>"#).unwrap();
        assert_eq!(value, json!({"a": {"unit": "px", "#text": 12}}));
    }

    #[test]
    fn fragments_are_wrapped_and_the_wrapper_is_stripped() {
        let value = xml_to_value("<a>1</a><b>2</b>").unwrap();
        assert_eq!(value, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn a_leading_declaration_is_tolerated() {
        let value = xml_to_value("<?xml version=\"1.0\"?>\n<a>1</a>").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn empty_elements_read_as_empty_strings() {
        let value = xml_to_value("<a/>").unwrap();
        assert_eq!(value, json!({"a": ""}));
    }

    #[test]
    fn empty_input_reads_as_an_empty_document() {
        let value = xml_to_value("<?xml version=\"1.0\"?>").unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn non_xml_input_is_rejected() {
        let err = xml_to_value("{\"a\": 1}").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidXml { .. }));

        let err = xml_to_value("<unclosed>").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidXml { .. }));
    }

    #[test]
    fn value_to_xml_writes_elements_and_repeated_arrays() {
        let xml = value_to_xml(&json!({"a": 1, "list": [1, 2], "flag": true}));
        assert_eq!(
            xml,
            "<a>1</a>\n<list>1</list>\n<list>2</list>\n<flag>true</flag>\n"
        );
    }

    #[test]
    fn value_to_xml_indents_nested_objects_and_escapes_text() {
        let xml = value_to_xml(&json!({"o": {"s": "a & b"}}));
        assert_eq!(xml, "<o>\n  <s>a &amp; b</s>\n</o>\n");
    }

    #[test]
    fn value_to_xml_emits_self_closing_empty_elements() {
        let xml = value_to_xml(&json!({"a": "", "b": null}));
        assert_eq!(xml, "<a/>\n<b/>\n");
    }

    #[test]
    fn xml_feeds_straight_into_the_graph_builder() {
        let value = xml_to_value("<config><x>1</x><items><i>1</i><i>2</i></items></config>")
            .unwrap();
        let graph = crate::build_graph(&value).unwrap();
        assert!(graph.nodes.iter().any(|node| node.id == "config"));
    }
}
