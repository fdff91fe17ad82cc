//! Declarative render scene.
//!
//! [`Scene::build`] turns the current editor state into a flat display
//! list that any painting backend (egui, HTML canvas, test assertions)
//! can consume without knowing the graph model. Building a scene never
//! mutates the editor; hosts rebuild whenever
//! [`FlowEditor::take_redraw`](crate::editor::FlowEditor::take_redraw)
//! reports a change.

use crate::editor::{FlowEditor, Gesture, Selection};
use crate::geometry::{Point, Rect, Size};
use crate::palette::Color;
use ahash::AHashMap;

/// Backdrop grid spacing, for hosts that draw the grid.
pub const GRID_SPACING: f32 = 20.0;
/// Border color for the selected node.
pub const SELECTED_BORDER: &str = "#1f2937";
/// Default edge stroke color.
pub const EDGE_COLOR: &str = "#6b7280";
/// Stroke color of the transient connect line.
pub const PENDING_COLOR: &str = "#3b82f6";

/// Horizontal offset of the bezier control points from the anchors.
const CONTROL_OFFSET: f32 = 50.0;
const TITLE_MAX_CHARS: usize = 20;
const SUBTITLE_MAX_CHARS: usize = 25;

/// A node ready to paint: rounded rect, border emphasis, truncated
/// labels, and the four side anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSprite {
    pub id: String,
    pub rect: Rect,
    pub fill: Color,
    pub border: Color,
    pub border_width: f32,
    pub title: String,
    pub subtitle: String,
    pub selected: bool,
    /// Left, right, top, bottom connection points.
    pub anchors: [Point; 4],
}

/// A directed edge as a cubic bezier from the source's right-center
/// anchor to the target's left-center anchor, so parallel edges between
/// different node pairs do not cross node bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub id: String,
    pub from: Point,
    pub control_from: Point,
    pub control_to: Point,
    pub to: Point,
    pub color: Color,
    /// True when the source node has more than one outgoing edge: the
    /// node is a branch point and its edges render dashed to flag it.
    pub dashed: bool,
    pub selected: bool,
}

/// Transient feedback line while connect mode is active: origin node
/// center to the live pointer. Rendering-only; no graph mutation backs
/// it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingLink {
    pub from: Point,
    pub to: Point,
}

/// The complete display list for one repaint, in paint order: grid,
/// `edges`, `pending`, then `nodes` on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub canvas: Size,
    pub grid_spacing: f32,
    pub edges: Vec<EdgePath>,
    pub pending: Option<PendingLink>,
    pub nodes: Vec<NodeSprite>,
}

impl Scene {
    pub fn build(editor: &FlowEditor) -> Self {
        let graph = editor.graph();

        let mut out_degree: AHashMap<&str, usize> = AHashMap::new();
        for edge in graph.edges() {
            *out_degree.entry(edge.source.as_str()).or_default() += 1;
        }

        let edges = graph
            .edges()
            .iter()
            .filter_map(|edge| {
                let source = graph.node(&edge.source)?;
                let target = graph.node(&edge.target)?;
                let from = source.rect().right_anchor();
                let to = target.rect().left_anchor();
                Some(EdgePath {
                    id: edge.id.clone(),
                    from,
                    control_from: from.offset(CONTROL_OFFSET, 0.0),
                    control_to: to.offset(-CONTROL_OFFSET, 0.0),
                    to,
                    color: Color::new(EDGE_COLOR),
                    dashed: out_degree.get(edge.source.as_str()).copied().unwrap_or(0) > 1,
                    selected: matches!(
                        editor.selection(),
                        Some(Selection::Edge(id)) if *id == edge.id
                    ),
                })
            })
            .collect();

        let pending = match editor.gesture() {
            Gesture::Connect { origin_id } => graph.node(origin_id).map(|origin| PendingLink {
                from: origin.rect().center(),
                to: editor.pointer(),
            }),
            _ => None,
        };

        let nodes = graph
            .nodes()
            .iter()
            .map(|node| {
                let selected = matches!(
                    editor.selection(),
                    Some(Selection::Node(id)) if *id == node.id
                );
                let rect = node.rect();
                NodeSprite {
                    id: node.id.clone(),
                    rect,
                    fill: node.color.clone(),
                    border: if selected {
                        Color::new(SELECTED_BORDER)
                    } else {
                        node.color.darken(0.2)
                    },
                    border_width: if selected { 3.0 } else { 2.0 },
                    title: truncate(&node.label, TITLE_MAX_CHARS),
                    subtitle: truncate(&node.subtitle, SUBTITLE_MAX_CHARS),
                    selected,
                    anchors: [
                        rect.left_anchor(),
                        rect.right_anchor(),
                        rect.top_anchor(),
                        rect.bottom_anchor(),
                    ],
                }
            })
            .collect();

        Self {
            canvas: graph.canvas(),
            grid_spacing: GRID_SPACING,
            edges,
            pending,
            nodes,
        }
    }
}

/// Ellipsis-truncates labels the way the browser canvas did.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
