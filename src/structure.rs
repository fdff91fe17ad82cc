//! The semantic export: an adjacency mapping consumed by the bot
//! orchestration backend, plus the `POST /bot-structure` payload shape.
//!
//! This view is distinct from [`crate::snapshot`]: the snapshot carries
//! positions and colors for round-trip editing, while the structure is
//! only the execution order. Building it never mutates the graph, so
//! repeated exports of an unchanged graph are deep-equal.

use crate::graph::{END_NODE_ID, FlowGraph, START_NODE_ID};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved key under which the START sentinel's outgoing list is
/// published, so the backend can locate the entry point without knowing
/// internal ids.
pub const START_KEY: &str = "__start__";
/// Reserved token substituted for edge targets that point at the END
/// sentinel, keeping the serialized form stable across internal id
/// changes.
pub const END_TOKEN: &str = "__end__";

/// Adjacency mapping: node id (or [`START_KEY`]) to ordered outgoing
/// targets. A `BTreeMap` keeps the serialized JSON byte-stable.
pub type Structure = BTreeMap<String, Vec<String>>;

impl FlowGraph {
    /// Builds the execution-order adjacency mapping.
    ///
    /// Every node except END contributes a key, even with no outgoing
    /// edges; START's entry appears under [`START_KEY`]. Targets naming
    /// a sentinel are rewritten to the reserved tokens, and edges whose
    /// source is END are dropped entirely. Values preserve edge
    /// insertion order.
    pub fn export_structure(&self) -> Structure {
        let outgoing = self
            .edges()
            .iter()
            .filter(|e| e.source != END_NODE_ID)
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .into_group_map();

        self.nodes()
            .iter()
            .filter(|n| n.id != END_NODE_ID)
            .map(|node| {
                let key = exported_id(&node.id);
                let targets = outgoing
                    .get(node.id.as_str())
                    .map(|targets| targets.iter().copied().map(exported_id).collect())
                    .unwrap_or_default();
                (key, targets)
            })
            .collect()
    }
}

/// Maps internal ids to their wire spelling: sentinels become the
/// reserved tokens, everything else passes through.
fn exported_id(id: &str) -> String {
    match id {
        START_NODE_ID => START_KEY.to_string(),
        END_NODE_ID => END_TOKEN.to_string(),
        other => other.to_string(),
    }
}

/// Body of the backend's `POST /bot-structure` call. The crate only
/// defines and serializes this; transport belongs to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructurePayload {
    pub client_id: String,
    /// Flow name as entered by the user, normalized for use as an
    /// identifier (trimmed, whitespace runs collapsed to underscores).
    pub config_id: String,
    pub structure: Structure,
}

impl StructurePayload {
    pub fn new(client_id: impl Into<String>, flow_name: &str, graph: &FlowGraph) -> Self {
        Self {
            client_id: client_id.into(),
            config_id: normalize_config_id(flow_name),
            structure: graph.export_structure(),
        }
    }
}

/// Normalizes a human-entered flow name into a backend config id.
pub fn normalize_config_id(name: &str) -> String {
    name.trim().split_whitespace().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_id_collapses_whitespace() {
        assert_eq!(normalize_config_id("  My  Test Flow "), "My_Test_Flow");
        assert_eq!(normalize_config_id("plain"), "plain");
        assert_eq!(normalize_config_id(""), "");
    }
}
