use serde::{Deserialize, Serialize};

/// One conversion result: everything a hierarchical-tree renderer needs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DiagramGraph {
    #[serde(default)]
    pub nodes: Vec<DiagramNode>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

/// One visual box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagramNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(rename = "additionalInfo")]
    pub additional_info: AdditionalInfo,
    pub data: NodeData,
}

/// One label fragment inside a node.
///
/// Leaf nodes carry alternating Key/Value pairs (each with a stable sub-id); container nodes
/// carry an unkeyed label and, when non-empty, a `{N}` count badge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Annotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AdditionalInfo {
    #[serde(rename = "isLeaf")]
    pub is_leaf: bool,
    /// One-line summary for container nodes: `"<key> {<count>}"`.
    #[serde(
        default,
        rename = "mergedContent",
        skip_serializing_if = "Option::is_none"
    )]
    pub merged_content: Option<String>,
}

/// Inspection payload surfaced when a node is activated.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NodeData {
    /// Dotted/bracketed locator from the literal `Root` label down to this node's origin.
    pub path: String,
    pub title: String,
    /// The literal text a user would copy from the detail surface.
    pub actualdata: String,
    #[serde(
        default,
        rename = "displayContent",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_content: Option<DisplayContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayContent {
    pub key: Vec<String>,
    #[serde(rename = "displayValue")]
    pub display_value: u64,
}

/// One directed edge; layout and styling are a rendering concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Connector {
    pub id: String,
    #[serde(rename = "sourceID")]
    pub source_id: String,
    #[serde(rename = "targetID")]
    pub target_id: String,
}
