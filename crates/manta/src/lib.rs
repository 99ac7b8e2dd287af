#![forbid(unsafe_code)]

//! `manta` is a headless JSON/XML document visualizer core.
//!
//! It converts an arbitrary parsed JSON value (or JSON derived from XML) into a directed,
//! rooted graph of diagram nodes and connectors suitable for hierarchical-tree rendering.
//! The conversion logic lives in [`manta_core`]; this crate re-exports it.
//!
//! ## Example
//!
//! ```
//! use manta::build_graph;
//! use serde_json::json;
//!
//! let graph = build_graph(&json!({"config": {"x": 1, "items": [1, 2]}}))?;
//! assert!(graph.nodes.iter().any(|node| node.id == "config"));
//! # Ok::<(), manta::Error>(())
//! ```

pub use manta_core::*;
