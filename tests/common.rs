//! Common test utilities for building editors, flows, and snapshots.
use keiro::prelude::*;

pub const CANVAS: Size = Size::new(1200.0, 700.0);

/// A deterministic editor: seeded placement, sentinels only.
#[allow(dead_code)]
pub fn seeded_editor() -> FlowEditor {
    FlowEditor::with_seed(CANVAS, 42)
}

/// Moves a node to an exact position by driving the drag operations,
/// so tests can lay out known geometry.
#[allow(dead_code)]
pub fn move_node(editor: &mut FlowEditor, node_id: &str, to: Point) {
    let from = editor
        .graph()
        .node(node_id)
        .expect("node to move must exist")
        .position;
    assert!(editor.begin_drag(node_id, from));
    editor.update_drag(to);
    editor.end_drag();
    editor.clear_selection();
}

/// Adds a bot node and parks it at the given position.
#[allow(dead_code)]
pub fn add_bot_at(editor: &mut FlowEditor, label: &str, position: Point) -> String {
    let id = editor.add_node(
        format!("bot-{}", label.to_lowercase()),
        label,
        format!("{label} description"),
        editor.graph().node_count(),
    );
    move_node(editor, &id, position);
    id
}

/// The branch fixture from the export scenarios: START -> A, A -> B,
/// A -> C, C -> END. Returns (a, b, c).
#[allow(dead_code)]
pub fn branch_flow(editor: &mut FlowEditor) -> (String, String, String) {
    let a = add_bot_at(editor, "A", Point::new(300.0, 100.0));
    let b = add_bot_at(editor, "B", Point::new(600.0, 50.0));
    let c = add_bot_at(editor, "C", Point::new(600.0, 300.0));
    assert!(editor.add_edge(START_NODE_ID, &a).is_some());
    assert!(editor.add_edge(&a, &b).is_some());
    assert!(editor.add_edge(&a, &c).is_some());
    assert!(editor.add_edge(&c, END_NODE_ID).is_some());
    (a, b, c)
}

/// A legacy-format snapshot (pre-sentinel, browser field spellings).
#[allow(dead_code)]
pub fn legacy_snapshot_json() -> &'static str {
    r##"{
        "nodes": [
            {
                "id": "node_1700000000001",
                "botId": "bot-7",
                "name": "Data Analyst Bot",
                "description": "Processes data input",
                "x": 220.0,
                "y": 140.0,
                "width": 180.0,
                "height": 80.0,
                "color": "#3b82f6"
            },
            {
                "id": "node_1700000000002",
                "botId": "bot-9",
                "name": "Content Writer Bot",
                "description": "Generates content",
                "x": 520.0,
                "y": 260.0,
                "width": 180.0,
                "height": 80.0,
                "color": "#8b5cf6"
            }
        ],
        "connections": [
            {
                "from": "node_1700000000001",
                "to": "node_1700000000002"
            }
        ]
    }"##
}
