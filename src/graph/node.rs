use crate::geometry::{Point, Rect, Size};
use crate::palette::{Color, END_COLOR, START_COLOR};

/// Reserved id of the START sentinel. Stable for the life of a graph
/// and never reused for bot nodes.
pub const START_NODE_ID: &str = "start";
/// Reserved id of the END sentinel.
pub const END_NODE_ID: &str = "end";

/// Default node extent, matching the browser canvas implementation.
pub const NODE_WIDTH: f32 = 180.0;
pub const NODE_HEIGHT: f32 = 80.0;

/// Discriminates the two structural sentinels from ordinary bot nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Start,
    End,
    Bot,
}

impl NodeKind {
    /// Sentinels are always present and cannot be removed or duplicated.
    pub fn is_sentinel(self) -> bool {
        matches!(self, NodeKind::Start | NodeKind::End)
    }

    /// Infers the kind from a node id, for snapshots that predate the
    /// explicit kind field.
    pub fn from_id(id: &str) -> Self {
        match id {
            START_NODE_ID => NodeKind::Start,
            END_NODE_ID => NodeKind::End,
            _ => NodeKind::Bot,
        }
    }
}

/// A single node in the flow graph: a positioned, colored reference to
/// an external bot entity (or a sentinel bounding the flow).
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    pub id: String,
    pub kind: NodeKind,
    /// Id of the bot this node represents. Not owned; sentinels have none.
    pub source_ref: Option<String>,
    /// Display name, a denormalized copy of the bot's name.
    pub label: String,
    /// Short description shown under the label.
    pub subtitle: String,
    pub position: Point,
    pub size: Size,
    pub color: Color,
}

impl FlowNode {
    pub(crate) fn start(position: Point) -> Self {
        Self {
            id: START_NODE_ID.to_string(),
            kind: NodeKind::Start,
            source_ref: None,
            label: "START".to_string(),
            subtitle: "Flow entry point".to_string(),
            position,
            size: Size::new(NODE_WIDTH, NODE_HEIGHT),
            color: Color::new(START_COLOR),
        }
    }

    pub(crate) fn end(position: Point) -> Self {
        Self {
            id: END_NODE_ID.to_string(),
            kind: NodeKind::End,
            source_ref: None,
            label: "END".to_string(),
            subtitle: "Flow exit point".to_string(),
            position,
            size: Size::new(NODE_WIDTH, NODE_HEIGHT),
            color: Color::new(END_COLOR),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.kind.is_sentinel()
    }

    /// The node's bounding box, used for hit-testing and rendering.
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}
