/// A directed execution link between two nodes.
///
/// Both endpoints always name an existing node; the graph enforces this
/// on insertion and cascades removal when an endpoint disappears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl FlowEdge {
    /// Whether this edge touches the given node, in either direction.
    pub fn references(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
