//! The visual snapshot: raw node/edge collections with positions and
//! colors, for persistence and round-trip editing.
//!
//! The wire types here are separate from the in-memory graph model so
//! the JSON can keep the browser editors' field spellings (`botId`,
//! `name`, `connections`, `from`/`to`) via serde aliases, on both the
//! legacy canvas format and this crate's own exports.

use crate::error::SnapshotError;
use crate::geometry::{Point, Size};
use crate::graph::{END_NODE_ID, FlowEdge, FlowGraph, FlowNode, NodeKind, START_NODE_ID};
use crate::palette::Color;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::fs;

/// One node as persisted: flat coordinates plus denormalized bot data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: String,
    #[serde(default, alias = "botId", skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,
    #[serde(alias = "name")]
    pub label: String,
    #[serde(default, alias = "description")]
    pub subtitle: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_color")]
    pub color: Color,
}

/// One persisted edge. Ids are optional on input; missing or colliding
/// ones are regenerated on import, since only the endpoints carry
/// meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "from")]
    pub source: String,
    #[serde(alias = "to")]
    pub target: String,
}

/// A complete persisted flow graph, minus transient view state
/// (selection and in-flight gestures are deliberately not part of it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualSnapshot {
    pub nodes: Vec<SnapshotNode>,
    #[serde(alias = "connections")]
    pub edges: Vec<SnapshotEdge>,
}

fn default_width() -> f32 {
    crate::graph::NODE_WIDTH
}

fn default_height() -> f32 {
    crate::graph::NODE_HEIGHT
}

fn default_color() -> Color {
    Color::new("#6b7280")
}

impl VisualSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::JsonParse(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        // Serialization of these plain structs cannot fail.
        serde_json::to_string_pretty(self).expect("snapshot serialization is infallible")
    }

    /// Reads a snapshot from a JSON file (the browser export format).
    pub fn from_file(path: &str) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path).map_err(|e| SnapshotError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Writes the snapshot as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<(), SnapshotError> {
        fs::write(path, self.to_json()).map_err(|e| SnapshotError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

impl FlowGraph {
    /// Raw snapshot of the current node/edge collections, positions and
    /// styles included. The semantic counterpart is
    /// [`FlowGraph::export_structure`].
    pub fn export_visual(&self) -> VisualSnapshot {
        VisualSnapshot {
            nodes: self
                .nodes()
                .iter()
                .map(|n| SnapshotNode {
                    id: n.id.clone(),
                    source_ref: n.source_ref.clone(),
                    label: n.label.clone(),
                    subtitle: n.subtitle.clone(),
                    x: n.position.x,
                    y: n.position.y,
                    width: n.size.width,
                    height: n.size.height,
                    color: n.color.clone(),
                })
                .collect(),
            edges: self
                .edges()
                .iter()
                .map(|e| SnapshotEdge {
                    id: Some(e.id.clone()),
                    source: e.source.clone(),
                    target: e.target.clone(),
                })
                .collect(),
        }
    }

    /// Replaces the graph wholesale with the snapshot's contents.
    ///
    /// The snapshot is validated in full before anything is touched, so
    /// a failed import leaves the graph unchanged. Snapshots that
    /// predate the sentinel scheme get START/END synthesized at their
    /// default positions; dangling edges, duplicate ids, duplicate
    /// (source, target) pairs, self-loops, and degenerate geometry are
    /// hard errors.
    pub fn import_visual(&mut self, snapshot: VisualSnapshot) -> Result<(), SnapshotError> {
        let mut nodes: Vec<FlowNode> = Vec::with_capacity(snapshot.nodes.len() + 2);
        let mut seen_ids: AHashSet<String> = AHashSet::new();

        for raw in snapshot.nodes {
            if !seen_ids.insert(raw.id.clone()) {
                return Err(SnapshotError::DuplicateNodeId(raw.id));
            }
            if !(raw.width.is_finite() && raw.width > 0.0)
                || !(raw.height.is_finite() && raw.height > 0.0)
            {
                return Err(SnapshotError::InvalidGeometry {
                    node_id: raw.id,
                    message: format!("size {}x{} is not positive", raw.width, raw.height),
                });
            }
            if !(raw.x.is_finite() && raw.y.is_finite()) {
                return Err(SnapshotError::InvalidGeometry {
                    node_id: raw.id,
                    message: "position is not finite".to_string(),
                });
            }
            nodes.push(FlowNode {
                kind: NodeKind::from_id(&raw.id),
                id: raw.id,
                source_ref: raw.source_ref,
                label: raw.label,
                subtitle: raw.subtitle,
                position: Point::new(raw.x, raw.y),
                size: Size::new(raw.width, raw.height),
                color: raw.color,
            });
        }

        // Older exports predate the sentinel scheme; synthesize rather
        // than strand that data.
        if !seen_ids.contains(START_NODE_ID) {
            let mid_y = (self.canvas().height - crate::graph::NODE_HEIGHT) / 2.0;
            nodes.push(FlowNode::start(Point::new(40.0, mid_y)));
            seen_ids.insert(START_NODE_ID.to_string());
        }
        if !seen_ids.contains(END_NODE_ID) {
            let mid_y = (self.canvas().height - crate::graph::NODE_HEIGHT) / 2.0;
            nodes.push(FlowNode::end(Point::new(
                (self.canvas().width - crate::graph::NODE_WIDTH - 40.0).max(40.0),
                mid_y,
            )));
            seen_ids.insert(END_NODE_ID.to_string());
        }

        let mut edges: Vec<FlowEdge> = Vec::with_capacity(snapshot.edges.len());
        let mut seen_pairs: AHashMap<String, AHashSet<String>> = AHashMap::new();
        let mut used_edge_ids: AHashSet<String> = AHashSet::new();
        let mut next_seq: u64 = 0;

        for raw in snapshot.edges {
            let id_hint = raw.id.clone().unwrap_or_default();
            if raw.source == raw.target {
                return Err(SnapshotError::SelfLoop(id_hint, raw.source));
            }
            for endpoint in [&raw.source, &raw.target] {
                if !seen_ids.contains(endpoint.as_str()) {
                    return Err(SnapshotError::DanglingEdge {
                        edge_id: id_hint.clone(),
                        missing_node_id: endpoint.clone(),
                    });
                }
            }
            if !seen_pairs
                .entry(raw.source.clone())
                .or_default()
                .insert(raw.target.clone())
            {
                return Err(SnapshotError::DuplicateEdge {
                    source_id: raw.source,
                    target_id: raw.target,
                });
            }
            let id = match raw.id {
                Some(id) if used_edge_ids.insert(id.clone()) => id,
                _ => loop {
                    next_seq += 1;
                    let candidate = format!("edge_{next_seq}");
                    if used_edge_ids.insert(candidate.clone()) {
                        break candidate;
                    }
                },
            };
            edges.push(FlowEdge {
                id,
                source: raw.source,
                target: raw.target,
            });
        }

        self.replace_contents(nodes, edges);
        Ok(())
    }
}
