use thiserror::Error;

/// Errors raised when importing a visual snapshot.
///
/// Mutation helpers on the live graph never error (invalid requests are
/// silent no-ops); a malformed snapshot is the one place where accepting
/// the input would break the edge referential invariant, so it is
/// rejected loudly instead.
#[derive(Error, Debug, Clone)]
pub enum SnapshotError {
    #[error("Failed to parse snapshot JSON: {0}")]
    JsonParse(String),

    #[error("Snapshot file '{path}' could not be accessed: {message}")]
    Io { path: String, message: String },

    #[error("Snapshot contains duplicate node id '{0}'")]
    DuplicateNodeId(String),

    #[error("Snapshot contains duplicate edge '{source_id}' -> '{target_id}'")]
    DuplicateEdge {
        source_id: String,
        target_id: String,
    },

    #[error("Edge '{edge_id}' references node '{missing_node_id}', which is not in the snapshot")]
    DanglingEdge {
        edge_id: String,
        missing_node_id: String,
    },

    #[error("Edge '{0}' connects node '{1}' to itself")]
    SelfLoop(String, String),

    #[error("Node '{node_id}' has invalid geometry: {message}")]
    InvalidGeometry { node_id: String, message: String },
}
