use rustc_hash::FxHashSet;
use serde_json::{Map, Value};

use crate::{Error, Result};

use super::model::{
    AdditionalInfo, Annotation, Connector, DiagramGraph, DiagramNode, DisplayContent, NodeData,
};
use super::normalize::{EMPTY_ROOT_FALLBACK_ID, KeyPartition, normalize_input, partition_entries};
use super::util::{annotation_text, child_count, display_text, normalize_node_id};
use super::{ARTIFICIAL_ROOT_ID, GraphConfig};

/// Converts a parsed JSON value into a rooted `{nodes, connectors}` graph.
///
/// Invalid top-level input (non-object, array, null, empty object) yields the canonical empty
/// graph. The only error is the id-collision defense: distinct input positions whose keys
/// normalize to the same identifier fail loudly instead of silently overwriting.
pub fn build_graph(input: &Value) -> Result<DiagramGraph> {
    build_graph_with(input, &GraphConfig::default())
}

pub fn build_graph_with(input: &Value, config: &GraphConfig) -> Result<DiagramGraph> {
    let Some(normalized) = normalize_input(input) else {
        return Ok(DiagramGraph::default());
    };

    let parts = partition_entries(normalized.doc.map());
    let mut builder = GraphBuilder::new(config);

    let root_id = builder.emit_root_leaf(
        &parts.primitive,
        normalized.root_label,
        normalized.skip_empty_root,
    )?;
    builder.process_top_level_nested(&parts.nested, root_id.as_deref())?;
    builder.attach_artificial_root(root_id.is_some(), normalized.skip_empty_root)?;

    tracing::debug!(
        nodes = builder.nodes.len(),
        connectors = builder.connectors.len(),
        "built diagram graph"
    );
    Ok(DiagramGraph {
        nodes: builder.nodes,
        connectors: builder.connectors,
    })
}

/// How an object element inside an array attaches to the tree.
///
/// The choice is a pure function of the element's primitive/nested entry counts; it exists to
/// keep single-wrapper elements from adding a noise level to the rendered hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ElementAttachment {
    /// Nothing to show (`{}` after empty-container elision): emit no node at all.
    Skip,
    /// Exactly one nested entry and no primitives: the nested container hangs directly off the
    /// array's parent, bypassing a per-index node.
    DirectChild,
    /// Primitive entries exist: the element becomes a leaf carrying their Key/Value pairs (any
    /// nested entries hang off that leaf).
    MergedLeaf,
    /// No primitives but two or more nested entries: the element becomes an `Item <index>` group.
    IndexedGroup,
}

pub(super) fn element_attachment(
    primitive_entries: usize,
    nested_entries: usize,
) -> ElementAttachment {
    if primitive_entries > 0 {
        return ElementAttachment::MergedLeaf;
    }
    match nested_entries {
        0 => ElementAttachment::Skip,
        1 => ElementAttachment::DirectChild,
        _ => ElementAttachment::IndexedGroup,
    }
}

struct GraphBuilder<'a> {
    config: &'a GraphConfig,
    nodes: Vec<DiagramNode>,
    connectors: Vec<Connector>,
    seen_ids: FxHashSet<String>,
}

impl<'a> GraphBuilder<'a> {
    fn new(config: &'a GraphConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            connectors: Vec::new(),
            seen_ids: FxHashSet::default(),
        }
    }

    fn push_node(&mut self, node: DiagramNode) -> Result<()> {
        if !self.seen_ids.insert(node.id.clone()) {
            return Err(Error::DuplicateNodeId {
                id: node.id,
                path: node.data.path,
            });
        }
        self.nodes.push(node);
        Ok(())
    }

    fn connect(&mut self, source: &str, target: &str) {
        self.connectors.push(Connector {
            id: format!("connector-{source}-{target}"),
            source_id: source.to_string(),
            target_id: target.to_string(),
        });
    }

    /// Merges all primitive top-level fields into one root leaf, if there are any.
    ///
    /// Returns the root leaf's id; `None` means the root stays virtual and top-level containers
    /// start out rootless (the finisher reconciles that later).
    fn emit_root_leaf(
        &mut self,
        primitive: &[(&str, &Value)],
        root_label: &str,
        skip_empty_root: bool,
    ) -> Result<Option<String>> {
        if primitive.is_empty() {
            return Ok(None);
        }

        let id = if skip_empty_root {
            EMPTY_ROOT_FALLBACK_ID.to_string()
        } else {
            normalize_node_id(root_label)
        };
        let content = joined_lines(primitive);
        self.push_node(DiagramNode {
            id: id.clone(),
            width: self.config.node_width,
            height: self.config.node_height,
            annotations: key_value_annotations(primitive, None),
            additional_info: AdditionalInfo {
                is_leaf: true,
                merged_content: None,
            },
            data: NodeData {
                path: "Root".to_string(),
                title: content.clone(),
                actualdata: content,
                display_content: None,
            },
        })?;
        Ok(Some(id))
    }

    fn process_top_level_nested(
        &mut self,
        nested: &[(&str, &Value)],
        root_id: Option<&str>,
    ) -> Result<()> {
        for (key, value) in nested {
            let id = normalize_node_id(key);
            let path = format!("Root.{key}");
            let count = child_count(value);
            let mut node = self.container_node(&id, key, count, path.clone());
            node.data.display_content = Some(DisplayContent {
                key: vec![key.to_string()],
                display_value: count as u64,
            });
            self.push_node(node)?;
            if let Some(root_id) = root_id {
                self.connect(root_id, &id);
            }
            self.process_nested(value, &id, &path, key)?;
        }
        Ok(())
    }

    fn process_nested(&mut self, value: &Value, parent_id: &str, path: &str, key: &str) -> Result<()> {
        match value {
            Value::Array(items) => self.process_array(items, parent_id, path, key),
            Value::Object(map) => self.process_object(map, parent_id, path),
            _ => Ok(()),
        }
    }

    fn process_object(
        &mut self,
        map: &Map<String, Value>,
        parent_id: &str,
        path: &str,
    ) -> Result<()> {
        let KeyPartition { primitive, nested } = partition_entries(map);

        if !primitive.is_empty() {
            let leaf_id = normalize_node_id(&format!("{parent_id}-leaf"));
            let content = joined_lines(&primitive);
            self.push_node(DiagramNode {
                id: leaf_id.clone(),
                width: self.config.node_width,
                height: self.config.node_height,
                annotations: key_value_annotations(&primitive, Some(&leaf_id)),
                additional_info: AdditionalInfo {
                    is_leaf: true,
                    merged_content: None,
                },
                data: NodeData {
                    path: format!("{path}.leaf"),
                    title: content.clone(),
                    actualdata: content,
                    display_content: None,
                },
            })?;
            self.connect(parent_id, &leaf_id);
        }

        for (key, value) in &nested {
            let child_id = normalize_node_id(&format!("{parent_id}-{key}"));
            let child_path = format!("{path}.{key}");
            let node = self.container_node(&child_id, key, child_count(value), child_path.clone());
            self.push_node(node)?;
            self.connect(parent_id, &child_id);
            self.process_nested(value, &child_id, &child_path, key)?;
        }
        Ok(())
    }

    fn process_array(
        &mut self,
        items: &[Value],
        parent_id: &str,
        path: &str,
        key: &str,
    ) -> Result<()> {
        for (index, item) in items.iter().enumerate() {
            if item.is_null() {
                continue;
            }
            let element_id = normalize_node_id(&format!("{parent_id}-{index}"));
            match item {
                Value::Object(map) => {
                    self.process_array_object_element(map, &element_id, parent_id, index, path, key)?;
                }
                other => {
                    let content = display_text(other);
                    self.push_node(DiagramNode {
                        id: element_id.clone(),
                        width: self.config.node_width,
                        height: self.config.node_height,
                        annotations: vec![Annotation {
                            id: None,
                            content: content.clone(),
                        }],
                        additional_info: AdditionalInfo {
                            is_leaf: true,
                            merged_content: None,
                        },
                        data: NodeData {
                            path: format!("{path}/{key}[{index}]"),
                            title: content.clone(),
                            actualdata: content,
                            display_content: None,
                        },
                    })?;
                    self.connect(parent_id, &element_id);
                }
            }
        }
        Ok(())
    }

    fn process_array_object_element(
        &mut self,
        map: &Map<String, Value>,
        element_id: &str,
        parent_id: &str,
        index: usize,
        path: &str,
        key: &str,
    ) -> Result<()> {
        let KeyPartition { primitive, nested } = partition_entries(map);

        match element_attachment(primitive.len(), nested.len()) {
            ElementAttachment::Skip => Ok(()),
            ElementAttachment::DirectChild => {
                let (nested_key, nested_value) = nested[0];
                let child_id = normalize_node_id(&format!("{element_id}-{nested_key}"));
                let child_path = format!("{path}/{key}[{index}].{nested_key}");
                let node = self.container_node(
                    &child_id,
                    nested_key,
                    child_count(nested_value),
                    child_path.clone(),
                );
                self.push_node(node)?;
                self.connect(parent_id, &child_id);
                self.process_nested(nested_value, &child_id, &child_path, nested_key)
            }
            ElementAttachment::MergedLeaf | ElementAttachment::IndexedGroup => {
                let is_leaf = !primitive.is_empty();
                let (annotations, content) = if is_leaf {
                    (
                        key_value_annotations(&primitive, Some(element_id)),
                        joined_lines(&primitive),
                    )
                } else {
                    let label = format!("Item {index}");
                    (
                        vec![Annotation {
                            id: None,
                            content: label.clone(),
                        }],
                        label,
                    )
                };
                self.push_node(DiagramNode {
                    id: element_id.to_string(),
                    width: self.config.node_width,
                    height: self.config.node_height,
                    annotations,
                    additional_info: AdditionalInfo {
                        is_leaf,
                        merged_content: None,
                    },
                    data: NodeData {
                        path: format!("{path}/{key}[{index}]"),
                        title: content.clone(),
                        actualdata: content,
                        display_content: None,
                    },
                })?;
                self.connect(parent_id, element_id);

                for (nested_key, nested_value) in &nested {
                    let child_id = normalize_node_id(&format!("{element_id}-{nested_key}"));
                    let child_path = format!("{path}/{key}[{index}].{nested_key}");
                    let node = self.container_node(
                        &child_id,
                        nested_key,
                        child_count(nested_value),
                        child_path.clone(),
                    );
                    self.push_node(node)?;
                    self.connect(element_id, &child_id);
                    self.process_nested(nested_value, &child_id, &child_path, nested_key)?;
                }
                Ok(())
            }
        }
    }

    fn container_node(&self, id: &str, label: &str, count: usize, path: String) -> DiagramNode {
        let mut annotations = vec![Annotation {
            id: None,
            content: label.to_string(),
        }];
        if count > 0 {
            annotations.push(Annotation {
                id: None,
                content: format!("{{{count}}}"),
            });
        }
        DiagramNode {
            id: id.to_string(),
            width: self.config.node_width,
            height: self.config.node_height,
            annotations,
            additional_info: AdditionalInfo {
                is_leaf: false,
                merged_content: Some(format!("{label} {{{count}}}")),
            },
            data: NodeData {
                path,
                title: label.to_string(),
                actualdata: label.to_string(),
                display_content: None,
            },
        }
    }

    /// Guarantees the single-root property the downstream tree layout requires.
    ///
    /// When no literal root leaf was created and more than one node has no incoming connector
    /// (the collapsed-empty-root case forces the check), an artificial umbrella root is appended
    /// and wired to every rootless node in their existing order.
    fn attach_artificial_root(&mut self, root_created: bool, skip_empty_root: bool) -> Result<()> {
        if root_created {
            return Ok(());
        }
        let rootless = self.rootless_node_ids();
        if !(skip_empty_root || rootless.len() > 1) {
            return Ok(());
        }
        if rootless.len() <= 1 {
            return Ok(());
        }

        let size = self.config.artificial_root_size;
        self.push_node(DiagramNode {
            id: ARTIFICIAL_ROOT_ID.to_string(),
            width: size,
            height: size,
            annotations: vec![Annotation {
                id: None,
                content: String::new(),
            }],
            additional_info: AdditionalInfo {
                is_leaf: false,
                merged_content: None,
            },
            data: NodeData {
                path: "MainRoot".to_string(),
                title: "Main Artificial Root".to_string(),
                actualdata: String::new(),
                display_content: None,
            },
        })?;
        for id in rootless {
            self.connect(ARTIFICIAL_ROOT_ID, &id);
        }
        Ok(())
    }

    fn rootless_node_ids(&self) -> Vec<String> {
        let targets: FxHashSet<&str> = self
            .connectors
            .iter()
            .map(|connector| connector.target_id.as_str())
            .collect();
        self.nodes
            .iter()
            .filter(|node| !targets.contains(node.id.as_str()))
            .map(|node| node.id.clone())
            .collect()
    }
}

/// Alternating Key/Value annotation pairs for merged primitive fields.
///
/// Sub-ids are scoped by the owning leaf id below the top level so repeated field names across
/// sibling leaves stay distinct.
fn key_value_annotations(entries: &[(&str, &Value)], scope: Option<&str>) -> Vec<Annotation> {
    let mut annotations = Vec::with_capacity(entries.len() * 2);
    for (key, value) in entries {
        let (key_id, value_id) = match scope {
            Some(scope) => (format!("Key_{scope}_{key}"), format!("Value_{scope}_{key}")),
            None => (format!("Key_{key}"), format!("Value_{key}")),
        };
        annotations.push(Annotation {
            id: Some(key_id),
            content: format!("{key}:"),
        });
        annotations.push(Annotation {
            id: Some(value_id),
            content: annotation_text(value),
        });
    }
    annotations
}

fn joined_lines(entries: &[(&str, &Value)]) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("{key}: {}", display_text(value)))
        .collect::<Vec<_>>()
        .join("\n")
}
