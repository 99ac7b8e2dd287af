#![forbid(unsafe_code)]

//! JSON/XML document to hierarchical diagram graph converter (headless).
//!
//! Design goals:
//! - deterministic output: node ids derive from lexical key paths, never from counters
//! - renderer-agnostic: the only product is `{nodes, connectors}` plus a per-node
//!   inspection payload (`path`, `actualdata`)
//! - graceful degradation: unusual input yields the canonical empty graph, never a panic

pub mod detect;
pub mod details;
pub mod error;
pub mod graph;
pub mod xml;

pub use detect::{InputFormat, detect_format};
pub use error::{Error, Result};
pub use graph::{
    ARTIFICIAL_ROOT_ID, Connector, DiagramGraph, DiagramNode, GraphConfig, build_graph,
    build_graph_with,
};

/// Builds a diagram graph straight from JSON or XML text.
///
/// This is the convenience entry point for front ends that hold raw editor/file content. Callers
/// that already have a parsed [`serde_json::Value`] should use [`build_graph`] directly.
pub fn build_graph_from_text(text: &str, format: InputFormat) -> Result<DiagramGraph> {
    build_graph_from_text_with(text, format, &GraphConfig::default())
}

/// Variant of [`build_graph_from_text`] with explicit node sizing.
pub fn build_graph_from_text_with(
    text: &str,
    format: InputFormat,
    config: &GraphConfig,
) -> Result<DiagramGraph> {
    let value = match format {
        InputFormat::Json => {
            serde_json::from_str(text).map_err(|err| Error::InvalidJson {
                message: err.to_string(),
            })?
        }
        InputFormat::Xml => xml::xml_to_value(text)?,
    };
    build_graph_with(&value, config)
}
