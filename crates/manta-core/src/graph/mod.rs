//! The conversion core: turns a parsed JSON value into a rooted diagram graph.

mod build;
mod model;
mod normalize;
pub(crate) mod util;


pub use build::{build_graph, build_graph_with};
pub use model::{
    AdditionalInfo, Annotation, Connector, DiagramGraph, DiagramNode, DisplayContent, NodeData,
};

/// Fixed id of the synthesized umbrella root (see the connectivity finisher in `build`).
pub const ARTIFICIAL_ROOT_ID: &str = "main-root";

pub const DEFAULT_NODE_WIDTH: f64 = 150.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 50.0;
pub const DEFAULT_ARTIFICIAL_ROOT_SIZE: f64 = 40.0;

/// Node sizing defaults applied by the builder.
///
/// Actual box sizing is a rendering concern; these values are only carried on the wire so a
/// hierarchical-tree layout has something to start from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub artificial_root_size: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            artificial_root_size: DEFAULT_ARTIFICIAL_ROOT_SIZE,
        }
    }
}
