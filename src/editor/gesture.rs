/// The single in-flight pointer gesture.
///
/// Drag and connect are variants of one enum rather than independent
/// flags, so the two can never be active at the same time: starting one
/// while the other is in progress is rejected by the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    /// Repositioning a node. `offset` is pointer-minus-node-origin,
    /// captured at press, so the node does not jump under the cursor.
    Drag {
        node_id: String,
        offset: (f32, f32),
        moved: bool,
    },
    /// Drawing a new edge out of `origin_id`; completed by releasing the
    /// pointer over a different node.
    Connect { origin_id: String },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_drag(&self) -> bool {
        matches!(self, Gesture::Drag { .. })
    }

    pub fn is_connect(&self) -> bool {
        matches!(self, Gesture::Connect { .. })
    }
}
