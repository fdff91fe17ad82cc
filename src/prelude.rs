//! Prelude module for convenient imports
//!
//! Re-exports the types needed for the common embed-an-editor workflow:
//! create a `FlowEditor`, feed it pointer events, build a `Scene` per
//! redraw, and hand `export_structure`/`export_visual` output to the
//! surrounding application.

// Editing session and graph model
pub use crate::editor::{FlowEditor, Gesture, Selection};
pub use crate::graph::{
    END_NODE_ID, FlowEdge, FlowGraph, FlowNode, NODE_HEIGHT, NODE_WIDTH, NodeKind, START_NODE_ID,
};

// Geometry and styling
pub use crate::geometry::{Point, Rect, Size};
pub use crate::palette::{Color, PALETTE};

// Render scene
pub use crate::scene::{EdgePath, NodeSprite, PendingLink, Scene};

// Serialization surfaces
pub use crate::snapshot::{SnapshotEdge, SnapshotNode, VisualSnapshot};
pub use crate::structure::{END_TOKEN, START_KEY, Structure, StructurePayload};

// Error types
pub use crate::error::SnapshotError;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
