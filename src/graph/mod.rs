//! The mutable flow graph: nodes, edges, and the invariants between them.
//!
//! `FlowGraph` is the single owner of both collections. All mutation goes
//! through the methods here (or through [`crate::editor::FlowEditor`],
//! which wraps a graph); external consumers only read, via the export
//! surfaces in [`crate::snapshot`] and [`crate::structure`].

mod edge;
mod node;

pub use edge::FlowEdge;
pub use node::{END_NODE_ID, FlowNode, NODE_HEIGHT, NODE_WIDTH, NodeKind, START_NODE_ID};

use crate::geometry::{Point, Size};
use crate::palette::Color;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Default canvas bounds used when the host has not reported a size yet.
pub const DEFAULT_CANVAS: Size = Size::new(1200.0, 700.0);

/// A directed graph of bot nodes bounded by the START/END sentinels.
///
/// Invariants upheld by every mutation:
/// - both sentinels are always present and non-deletable,
/// - every edge endpoint names an existing node,
/// - no two edges share the same (source, target) pair,
/// - no edge connects a node to itself.
pub struct FlowGraph {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    canvas: Size,
    next_node_seq: u64,
    next_edge_seq: u64,
    rng: SmallRng,
}

impl FlowGraph {
    /// Creates a graph pre-seeded with the START/END sentinels, placed at
    /// the left and right edges of the given canvas.
    pub fn new(canvas: Size) -> Self {
        Self::with_rng(canvas, SmallRng::from_os_rng())
    }

    /// Like [`FlowGraph::new`], but with a fixed seed for node placement.
    /// Tests use this to make spawn positions reproducible.
    pub fn with_seed(canvas: Size, seed: u64) -> Self {
        Self::with_rng(canvas, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(canvas: Size, rng: SmallRng) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            canvas,
            next_node_seq: 0,
            next_edge_seq: 0,
            rng,
        };
        graph.seed_sentinels();
        graph
    }

    fn seed_sentinels(&mut self) {
        let mid_y = (self.canvas.height - NODE_HEIGHT) / 2.0;
        self.nodes.push(FlowNode::start(Point::new(40.0, mid_y)));
        self.nodes.push(FlowNode::end(Point::new(
            (self.canvas.width - NODE_WIDTH - 40.0).max(40.0),
            mid_y,
        )));
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&FlowEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Number of nodes, sentinels included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of outgoing edges from the given node. Nodes with more than
    /// one are branch points and render their edges dashed.
    pub fn out_degree(&self, node_id: &str) -> usize {
        self.edges.iter().filter(|e| e.source == node_id).count()
    }

    /// Records the canvas bounds used to clamp spawn positions. Existing
    /// nodes are left where they are, matching the browser behavior on
    /// window resize.
    pub fn resize_canvas(&mut self, canvas: Size) {
        self.canvas = canvas;
    }

    /// Adds a bot node at a random position chosen so the node's full
    /// extent stays inside the canvas. Always succeeds; returns the new
    /// node.
    pub fn add_node(
        &mut self,
        source_ref: impl Into<String>,
        label: impl Into<String>,
        subtitle: impl Into<String>,
        palette_index: usize,
    ) -> &FlowNode {
        let id = self.next_node_id();
        let position = self.spawn_position();
        self.nodes.push(FlowNode {
            id,
            kind: NodeKind::Bot,
            source_ref: Some(source_ref.into()),
            label: label.into(),
            subtitle: subtitle.into(),
            position,
            size: Size::new(NODE_WIDTH, NODE_HEIGHT),
            color: Color::by_index(palette_index),
        });
        self.nodes.last().expect("node was just pushed")
    }

    /// Removes a bot node and every edge touching it. Sentinels and
    /// unknown ids are silent no-ops; returns whether anything changed.
    pub fn remove_node(&mut self, node_id: &str) -> bool {
        let Some(index) = self.nodes.iter().position(|n| n.id == node_id) else {
            return false;
        };
        if self.nodes[index].is_sentinel() {
            return false;
        }
        self.nodes.remove(index);
        self.edges.retain(|e| !e.references(node_id));
        true
    }

    /// Adds a directed edge. Rejected (returning `None`, with no
    /// mutation) for self-loops, unknown endpoints, and duplicate
    /// (source, target) pairs.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Option<&FlowEdge> {
        if source == target {
            return None;
        }
        if self.node(source).is_none() || self.node(target).is_none() {
            return None;
        }
        if self
            .edges
            .iter()
            .any(|e| e.source == source && e.target == target)
        {
            return None;
        }
        let id = self.next_edge_id();
        self.edges.push(FlowEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
        });
        self.edges.last()
    }

    /// Removes the edge if present; no-op otherwise.
    pub fn remove_edge(&mut self, edge_id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != edge_id);
        self.edges.len() != before
    }

    /// Clones a bot node, offset by (20, 20) from the original. Sentinels
    /// and unknown ids are not duplicated. Edges are not copied.
    pub fn duplicate_node(&mut self, node_id: &str) -> Option<String> {
        let original = self.node(node_id)?;
        if original.is_sentinel() {
            return None;
        }
        let mut copy = original.clone();
        copy.position = copy.position.offset(20.0, 20.0);
        copy.id = self.next_node_id();
        let id = copy.id.clone();
        self.nodes.push(copy);
        Some(id)
    }

    /// Drops all bot nodes and edges and re-seeds the sentinels.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.seed_sentinels();
    }

    /// Returns the topmost node whose bounding box contains `point`.
    ///
    /// Overlap is resolved most-recently-added-wins: nodes are scanned in
    /// reverse insertion order and the first hit is returned, so the
    /// result is deterministic when nodes stack.
    pub fn hit_test(&self, point: Point) -> Option<&FlowNode> {
        self.nodes.iter().rev().find(|n| n.contains(point))
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Swaps in an already-validated node/edge set (snapshot import) and
    /// advances the id counters past any generated ids it contains.
    pub(crate) fn replace_contents(&mut self, nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) {
        self.next_node_seq = nodes
            .iter()
            .filter_map(|n| generated_seq(&n.id, "node_"))
            .fold(self.next_node_seq, u64::max);
        self.next_edge_seq = edges
            .iter()
            .filter_map(|e| generated_seq(&e.id, "edge_"))
            .fold(self.next_edge_seq, u64::max);
        self.nodes = nodes;
        self.edges = edges;
    }

    fn next_node_id(&mut self) -> String {
        self.next_node_seq += 1;
        format!("node_{}", self.next_node_seq)
    }

    fn next_edge_id(&mut self) -> String {
        self.next_edge_seq += 1;
        format!("edge_{}", self.next_edge_seq)
    }

    fn spawn_position(&mut self) -> Point {
        let max_x = (self.canvas.width - NODE_WIDTH).max(0.0);
        let max_y = (self.canvas.height - NODE_HEIGHT).max(0.0);
        Point::new(
            self.rng.random_range(0.0..=max_x),
            self.rng.random_range(0.0..=max_y),
        )
    }
}

/// Extracts `N` from ids of the form `<prefix>N`, ignoring foreign ids.
fn generated_seq(id: &str, prefix: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.parse().ok()
}
