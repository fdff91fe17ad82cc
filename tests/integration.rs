//! End-to-end tests: full editing sessions, snapshot round-trips, and
//! scene building.
mod common;
use common::*;
use keiro::prelude::*;

#[test]
fn visual_snapshot_round_trips_exactly() {
    let mut editor = seeded_editor();
    branch_flow(&mut editor);
    editor.select_node(START_NODE_ID); // transient, must not be serialized

    let snapshot = editor.export_visual();
    let mut restored = FlowEditor::with_seed(CANVAS, 99);
    restored
        .import_visual(snapshot.clone())
        .expect("own exports import cleanly");

    // Ignoring selection (dropped by design), the graphs are identical.
    assert_eq!(restored.export_visual(), snapshot);
    assert_eq!(restored.selection(), None);
    assert_eq!(restored.export_structure(), editor.export_structure());
}

#[test]
fn snapshot_survives_json_round_trip() {
    let mut editor = seeded_editor();
    branch_flow(&mut editor);

    let snapshot = editor.export_visual();
    let parsed = VisualSnapshot::from_json(&snapshot.to_json()).expect("valid JSON");
    assert_eq!(parsed, snapshot);
}

#[test]
fn legacy_browser_snapshot_gets_sentinels_synthesized() {
    let snapshot = VisualSnapshot::from_json(legacy_snapshot_json()).expect("legacy JSON parses");

    let mut editor = seeded_editor();
    editor.import_visual(snapshot).expect("legacy import works");

    let graph = editor.graph();
    // Two bot nodes from the file plus the synthesized sentinels.
    assert_eq!(graph.node_count(), 4);
    assert!(graph.node(START_NODE_ID).is_some());
    assert!(graph.node(END_NODE_ID).is_some());

    // Aliased fields mapped through.
    let analyst = graph.node("node_1700000000001").expect("node imported");
    assert_eq!(analyst.source_ref.as_deref(), Some("bot-7"));
    assert_eq!(analyst.label, "Data Analyst Bot");
    assert_eq!(analyst.subtitle, "Processes data input");
    assert_eq!(analyst.position, Point::new(220.0, 140.0));

    // The connection came through with a generated id.
    assert_eq!(graph.edge_count(), 1);
    let edge = &graph.edges()[0];
    assert!(!edge.id.is_empty());
    assert_eq!(edge.source, "node_1700000000001");
    assert_eq!(edge.target, "node_1700000000002");
}

#[test]
fn malformed_snapshots_are_rejected_loudly() {
    let mut editor = seeded_editor();
    let pristine = editor.export_visual();

    let dangling = VisualSnapshot {
        nodes: vec![],
        edges: vec![SnapshotEdge {
            id: None,
            source: "ghost".to_string(),
            target: "end".to_string(),
        }],
    };
    assert!(matches!(
        editor.import_visual(dangling),
        Err(SnapshotError::DanglingEdge { .. })
    ));

    let duplicate_nodes = VisualSnapshot {
        nodes: vec![
            SnapshotNode {
                id: "twin".to_string(),
                source_ref: None,
                label: "Twin".to_string(),
                subtitle: String::new(),
                x: 0.0,
                y: 0.0,
                width: 180.0,
                height: 80.0,
                color: Color::new("#3b82f6"),
            };
            2
        ],
        edges: vec![],
    };
    assert!(matches!(
        editor.import_visual(duplicate_nodes),
        Err(SnapshotError::DuplicateNodeId(id)) if id == "twin"
    ));

    let self_loop = VisualSnapshot::from_json(
        r#"{"nodes": [{"id": "a", "name": "A", "x": 0, "y": 0}],
            "edges": [{"source": "a", "target": "a"}]}"#,
    )
    .expect("parses");
    assert!(matches!(
        editor.import_visual(self_loop),
        Err(SnapshotError::SelfLoop(..))
    ));

    let bad_geometry = VisualSnapshot::from_json(
        r#"{"nodes": [{"id": "a", "name": "A", "x": 0, "y": 0, "width": -5, "height": 80}],
            "edges": []}"#,
    )
    .expect("parses");
    assert!(matches!(
        editor.import_visual(bad_geometry),
        Err(SnapshotError::InvalidGeometry { .. })
    ));

    assert!(VisualSnapshot::from_json("{not json").is_err());

    // Every failed import left the editor untouched.
    assert_eq!(editor.export_visual(), pristine);
}

#[test]
fn duplicate_edge_pairs_in_snapshot_are_rejected() {
    let json = r#"{
        "nodes": [
            {"id": "a", "name": "A", "x": 0, "y": 0},
            {"id": "b", "name": "B", "x": 300, "y": 0}
        ],
        "edges": [
            {"source": "a", "target": "b"},
            {"source": "a", "target": "b"}
        ]
    }"#;
    let snapshot = VisualSnapshot::from_json(json).expect("parses");
    let mut editor = seeded_editor();
    let err = editor.import_visual(snapshot).unwrap_err();
    match &err {
        SnapshotError::DuplicateEdge {
            source_id,
            target_id,
        } => {
            assert_eq!(source_id, "a");
            assert_eq!(target_id, "b");
        }
        other => panic!("expected DuplicateEdge, got {other:?}"),
    }
    // The offending pair is named in the message, and the error carries
    // no chained cause.
    assert_eq!(err.to_string(), "Snapshot contains duplicate edge 'a' -> 'b'");
    assert!(std::error::Error::source(&err).is_none());
}

#[test]
fn editing_continues_cleanly_after_import() {
    let snapshot = VisualSnapshot::from_json(legacy_snapshot_json()).expect("parses");
    let mut editor = seeded_editor();
    editor.import_visual(snapshot).expect("imports");

    // Generated ids must not collide with imported ones.
    let new_node = editor.add_node("bot-1", "New Bot", "", 0);
    assert!(editor.graph().node(&new_node).is_some());
    assert_ne!(new_node, "node_1700000000001");
    assert_ne!(new_node, "node_1700000000002");

    assert!(editor.add_edge(START_NODE_ID, &new_node).is_some());
    assert!(
        editor
            .export_structure()
            .contains_key(new_node.as_str())
    );
}

#[test]
fn scene_tolerates_non_ascii_snapshot_colors() {
    // Six bytes after the '#', but '£' spans two of them.
    let snapshot = VisualSnapshot::from_json(
        r##"{"nodes": [{"id": "a", "name": "A", "x": 0, "y": 0, "color": "#a£cde"}],
            "edges": []}"##,
    )
    .expect("parses");
    let mut editor = seeded_editor();
    editor.import_visual(snapshot).expect("imports");

    let scene = Scene::build(&editor);
    let sprite = scene.nodes.iter().find(|n| n.id == "a").expect("sprite");
    // An unparseable color cannot be darkened; the border keeps it as-is.
    assert_eq!(sprite.border.as_str(), "#a£cde");
}

#[test]
fn scene_flags_branch_points_dashed() {
    let mut editor = seeded_editor();
    let (a, b, c) = branch_flow(&mut editor);

    let scene = Scene::build(&editor);
    assert_eq!(scene.edges.len(), 4);

    for edge_path in &scene.edges {
        let edge = editor
            .graph()
            .edges()
            .iter()
            .find(|e| e.id == edge_path.id)
            .unwrap();
        // Only A has two outgoing edges; its edges are the dashed ones.
        assert_eq!(edge_path.dashed, edge.source == a);
    }

    // B and C exist and contribute sprites alongside the sentinels.
    assert_eq!(scene.nodes.len(), 5);
    assert!(scene.nodes.iter().any(|n| n.id == b));
    assert!(scene.nodes.iter().any(|n| n.id == c));
    assert!(scene.pending.is_none());
}

#[test]
fn scene_anchors_edges_to_node_sides() {
    let mut editor = seeded_editor();
    let a = add_bot_at(&mut editor, "A", Point::new(100.0, 100.0));
    let b = add_bot_at(&mut editor, "B", Point::new(500.0, 300.0));
    assert!(editor.add_edge(&a, &b).is_some());

    let scene = Scene::build(&editor);
    let path = &scene.edges[0];
    // Right-center of A to left-center of B.
    assert_eq!(path.from, Point::new(100.0 + NODE_WIDTH, 100.0 + NODE_HEIGHT / 2.0));
    assert_eq!(path.to, Point::new(500.0, 300.0 + NODE_HEIGHT / 2.0));
    assert_eq!(path.control_from, path.from.offset(50.0, 0.0));
    assert_eq!(path.control_to, path.to.offset(-50.0, 0.0));
}

#[test]
fn scene_shows_pending_connect_line_and_selection_emphasis() {
    let mut editor = seeded_editor();
    let a = add_bot_at(&mut editor, "A", Point::new(100.0, 100.0));

    editor.select_node(&a);
    assert!(editor.begin_connect(&a));
    editor.on_pointer_move(Point::new(640.0, 420.0));

    let scene = Scene::build(&editor);
    let pending = scene.pending.expect("connect mode draws feedback");
    assert_eq!(
        pending.from,
        Point::new(100.0 + NODE_WIDTH / 2.0, 100.0 + NODE_HEIGHT / 2.0)
    );
    assert_eq!(pending.to, Point::new(640.0, 420.0));

    let sprite = scene.nodes.iter().find(|n| n.id == a).unwrap();
    assert!(sprite.selected);
    assert_eq!(sprite.border_width, 3.0);
    let other = scene.nodes.iter().find(|n| n.id == START_NODE_ID).unwrap();
    assert!(!other.selected);
    assert_eq!(other.border_width, 2.0);

    // Abandoning the gesture removes the feedback line.
    editor.on_escape();
    assert!(Scene::build(&editor).pending.is_none());
}
