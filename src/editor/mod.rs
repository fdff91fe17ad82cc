//! The interactive editing session: selection, gestures, and pointer
//! routing on top of a [`FlowGraph`].
//!
//! All state that used to live in page-level globals in the browser
//! implementations (selected node, drag flags, connect origin, live
//! pointer) is owned by the `FlowEditor` instance, scoped to one editor
//! lifetime.

mod gesture;

pub use gesture::Gesture;

use crate::error::SnapshotError;
use crate::geometry::{Point, Size};
use crate::graph::FlowGraph;
use crate::snapshot::VisualSnapshot;
use crate::structure::{Structure, StructurePayload};

/// The at-most-one selected element. Selecting a node clears any edge
/// selection and vice versa; selection is view state and never
/// serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Node(String),
    Edge(String),
}

/// An editing session over an exclusively-owned [`FlowGraph`].
///
/// Hosts feed raw pointer events into [`on_pointer_down`],
/// [`on_pointer_move`] and [`on_pointer_up`] (or drive the gesture
/// methods directly) and redraw whenever [`take_redraw`] reports a
/// change.
///
/// [`on_pointer_down`]: FlowEditor::on_pointer_down
/// [`on_pointer_move`]: FlowEditor::on_pointer_move
/// [`on_pointer_up`]: FlowEditor::on_pointer_up
/// [`take_redraw`]: FlowEditor::take_redraw
pub struct FlowEditor {
    graph: FlowGraph,
    gesture: Gesture,
    selection: Option<Selection>,
    pointer: Point,
    needs_redraw: bool,
}

impl FlowEditor {
    pub fn new(canvas: Size) -> Self {
        Self::from_graph(FlowGraph::new(canvas))
    }

    /// Deterministic node placement, for tests and reproducible demos.
    pub fn with_seed(canvas: Size, seed: u64) -> Self {
        Self::from_graph(FlowGraph::with_seed(canvas, seed))
    }

    pub fn from_graph(graph: FlowGraph) -> Self {
        Self {
            graph,
            gesture: Gesture::Idle,
            selection: None,
            pointer: Point::default(),
            needs_redraw: true,
        }
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Last pointer position seen, used for transient connect feedback.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Returns true once per change; hosts that redraw on demand call
    /// this each frame instead of repainting unconditionally.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn mark_redraw(&mut self) {
        self.needs_redraw = true;
    }

    // --- Graph mutation (delegates that keep view state consistent) ---

    /// Adds a bot node and returns its id.
    pub fn add_node(
        &mut self,
        source_ref: impl Into<String>,
        label: impl Into<String>,
        subtitle: impl Into<String>,
        palette_index: usize,
    ) -> String {
        let id = self
            .graph
            .add_node(source_ref, label, subtitle, palette_index)
            .id
            .clone();
        self.mark_redraw();
        id
    }

    /// Removes a node (sentinels are no-ops), clearing the selection if
    /// it pointed at the node and aborting any gesture involving it.
    pub fn remove_node(&mut self, node_id: &str) -> bool {
        if !self.graph.remove_node(node_id) {
            return false;
        }
        if matches!(&self.selection, Some(Selection::Node(id)) if id == node_id) {
            self.selection = None;
        }
        // Edges cascaded away; a selected edge may be gone too.
        if let Some(Selection::Edge(id)) = &self.selection {
            if self.graph.edge(id).is_none() {
                self.selection = None;
            }
        }
        match &self.gesture {
            Gesture::Drag { node_id: id, .. } | Gesture::Connect { origin_id: id }
                if id == node_id =>
            {
                self.gesture = Gesture::Idle;
            }
            _ => {}
        }
        self.mark_redraw();
        true
    }

    pub fn add_edge(&mut self, source: &str, target: &str) -> Option<String> {
        let id = self.graph.add_edge(source, target)?.id.clone();
        self.mark_redraw();
        Some(id)
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> bool {
        if !self.graph.remove_edge(edge_id) {
            return false;
        }
        if matches!(&self.selection, Some(Selection::Edge(id)) if id == edge_id) {
            self.selection = None;
        }
        self.mark_redraw();
        true
    }

    pub fn duplicate_node(&mut self, node_id: &str) -> Option<String> {
        let id = self.graph.duplicate_node(node_id)?;
        self.mark_redraw();
        Some(id)
    }

    /// Resets the graph to the two sentinels and drops all view state.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.selection = None;
        self.gesture = Gesture::Idle;
        self.mark_redraw();
    }

    pub fn resize_canvas(&mut self, canvas: Size) {
        self.graph.resize_canvas(canvas);
        self.mark_redraw();
    }

    // --- Selection ---

    pub fn select_node(&mut self, node_id: &str) -> bool {
        if self.graph.node(node_id).is_none() {
            return false;
        }
        self.selection = Some(Selection::Node(node_id.to_string()));
        self.mark_redraw();
        true
    }

    pub fn select_edge(&mut self, edge_id: &str) -> bool {
        if self.graph.edge(edge_id).is_none() {
            return false;
        }
        self.selection = Some(Selection::Edge(edge_id.to_string()));
        self.mark_redraw();
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.mark_redraw();
        }
    }

    // --- Gestures ---

    /// Starts dragging a node. Rejected (returning false) when another
    /// gesture is active or the node does not exist.
    pub fn begin_drag(&mut self, node_id: &str, pointer: Point) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }
        let Some(node) = self.graph.node(node_id) else {
            return false;
        };
        let offset = node.position.delta_to(pointer);
        self.gesture = Gesture::Drag {
            node_id: node_id.to_string(),
            offset,
            moved: false,
        };
        self.pointer = pointer;
        true
    }

    /// Moves the dragged node so it tracks the pointer with the offset
    /// captured at press. No bounds clamping: nodes may leave the canvas
    /// mid-drag.
    pub fn update_drag(&mut self, pointer: Point) {
        self.pointer = pointer;
        let Gesture::Drag {
            node_id,
            offset,
            moved,
        } = &mut self.gesture
        else {
            return;
        };
        let (dx, dy) = *offset;
        let id = node_id.clone();
        let target = Point::new(pointer.x - dx, pointer.y - dy);
        if let Some(node) = self.graph.node_mut(&id) {
            // A jitter-free press-and-release must not count as a move.
            if node.position != target {
                node.position = target;
                *moved = true;
            }
        }
        self.mark_redraw();
    }

    /// Ends the drag; a drag with no movement is a valid no-op. Returns
    /// whether the node actually moved.
    pub fn end_drag(&mut self) -> bool {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Drag { moved, .. } => {
                self.mark_redraw();
                moved
            }
            other => {
                self.gesture = other;
                false
            }
        }
    }

    /// Enters connect mode from the given node. Connect and drag are
    /// mutually exclusive: this is rejected while any gesture is active.
    pub fn begin_connect(&mut self, node_id: &str) -> bool {
        if !self.gesture.is_idle() || self.graph.node(node_id).is_none() {
            return false;
        }
        self.gesture = Gesture::Connect {
            origin_id: node_id.to_string(),
        };
        self.mark_redraw();
        true
    }

    /// Finishes connect mode at the given pointer position. An edge is
    /// added only when the pointer lands on a node other than the
    /// origin; otherwise the attempt is abandoned with no mutation.
    pub fn complete_connect(&mut self, pointer: Point) -> Option<String> {
        self.pointer = pointer;
        let Gesture::Connect { origin_id } = std::mem::replace(&mut self.gesture, Gesture::Idle)
        else {
            return None;
        };
        self.mark_redraw();
        let target_id = self.graph.hit_test(pointer)?.id.clone();
        if target_id == origin_id {
            return None;
        }
        Some(self.graph.add_edge(&origin_id, &target_id)?.id.clone())
    }

    /// Aborts any in-progress drag or connect without committing a
    /// mutation (Escape, or pointer released outside the canvas).
    pub fn cancel_gesture(&mut self) {
        if !self.gesture.is_idle() {
            self.gesture = Gesture::Idle;
            self.mark_redraw();
        }
    }

    // --- Pointer event routing (mirrors the browser handlers) ---

    /// Press: over a node, the modifier chooses connect vs drag (the
    /// distinct trigger keeping the two gestures unambiguous); over
    /// empty canvas the selection is cleared.
    pub fn on_pointer_down(&mut self, pos: Point, connect_modifier: bool) {
        self.pointer = pos;
        let Some(node_id) = self.graph.hit_test(pos).map(|n| n.id.clone()) else {
            self.clear_selection();
            return;
        };
        if connect_modifier {
            self.begin_connect(&node_id);
        } else if self.begin_drag(&node_id, pos) {
            self.select_node(&node_id);
        }
    }

    /// Move: drives the drag, or just records the pointer so the pending
    /// connect line tracks it.
    pub fn on_pointer_move(&mut self, pos: Point) {
        match self.gesture {
            Gesture::Drag { .. } => self.update_drag(pos),
            Gesture::Connect { .. } => {
                self.pointer = pos;
                self.mark_redraw();
            }
            Gesture::Idle => self.pointer = pos,
        }
    }

    /// Release: completes whichever gesture is active.
    pub fn on_pointer_up(&mut self, pos: Point) {
        match self.gesture {
            Gesture::Connect { .. } => {
                let _ = self.complete_connect(pos);
            }
            Gesture::Drag { .. } => {
                self.end_drag();
            }
            Gesture::Idle => {}
        }
    }

    pub fn on_escape(&mut self) {
        self.cancel_gesture();
    }

    // --- Export / import ---

    /// Execution-order adjacency mapping for the backend. Pure; see
    /// [`FlowGraph::export_structure`].
    pub fn export_structure(&self) -> Structure {
        self.graph.export_structure()
    }

    /// Ready-to-serialize `POST /bot-structure` body.
    pub fn structure_payload(&self, client_id: impl Into<String>, flow_name: &str) -> StructurePayload {
        StructurePayload::new(client_id, flow_name, &self.graph)
    }

    /// Raw visual snapshot for persistence and round-trip editing.
    pub fn export_visual(&self) -> VisualSnapshot {
        self.graph.export_visual()
    }

    /// Replaces the graph wholesale; selection and any in-flight gesture
    /// are dropped since they may reference replaced elements. A failed
    /// import leaves the editor untouched.
    pub fn import_visual(&mut self, snapshot: VisualSnapshot) -> Result<(), SnapshotError> {
        self.graph.import_visual(snapshot)?;
        self.selection = None;
        self.gesture = Gesture::Idle;
        self.mark_redraw();
        Ok(())
    }
}
