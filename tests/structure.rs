//! Tests for the backend structure export and payload shape.
mod common;
use common::*;
use keiro::prelude::*;

#[test]
fn empty_flow_exports_single_start_key() {
    let editor = seeded_editor();
    let structure = editor.export_structure();

    assert_eq!(structure.len(), 1);
    assert_eq!(structure[START_KEY], Vec::<String>::new());
}

#[test]
fn branch_flow_exports_full_adjacency() {
    let mut editor = seeded_editor();
    let (a, b, c) = branch_flow(&mut editor);
    let structure = editor.export_structure();

    // START, A, B, C; END never contributes a key.
    assert_eq!(structure.len(), 4);
    assert_eq!(structure[START_KEY], vec![a.clone()]);
    assert_eq!(structure[&a], vec![b.clone(), c.clone()]);
    assert_eq!(structure[&b], Vec::<String>::new());
    assert_eq!(structure[&c], vec![END_TOKEN.to_string()]);
    assert!(!structure.contains_key(END_NODE_ID));
}

#[test]
fn end_targets_are_rewritten_to_reserved_token() {
    let mut editor = seeded_editor();
    let a = add_bot_at(&mut editor, "A", Point::new(300.0, 100.0));
    assert!(editor.add_edge(&a, END_NODE_ID).is_some());

    let structure = editor.export_structure();
    assert_eq!(structure[&a], vec![END_TOKEN.to_string()]);
    // The raw sentinel id leaks nowhere.
    assert!(
        structure
            .values()
            .flatten()
            .all(|target| target != END_NODE_ID)
    );
}

#[test]
fn edges_out_of_end_are_dropped() {
    let mut editor = seeded_editor();
    let a = add_bot_at(&mut editor, "A", Point::new(300.0, 100.0));
    assert!(editor.add_edge(END_NODE_ID, &a).is_some());

    let structure = editor.export_structure();
    assert!(!structure.contains_key(END_NODE_ID));
    assert!(!structure.contains_key(END_TOKEN));
    assert_eq!(structure[&a], Vec::<String>::new());
}

#[test]
fn export_is_pure_and_idempotent() {
    let mut editor = seeded_editor();
    branch_flow(&mut editor);

    let first = editor.export_structure();
    let second = editor.export_structure();
    assert_eq!(first, second);

    // Byte-stable serialization too.
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn outgoing_lists_preserve_edge_insertion_order() {
    let mut editor = seeded_editor();
    let a = add_bot_at(&mut editor, "A", Point::new(100.0, 100.0));
    let b = add_bot_at(&mut editor, "B", Point::new(400.0, 100.0));
    let c = add_bot_at(&mut editor, "C", Point::new(700.0, 100.0));

    assert!(editor.add_edge(&a, &c).is_some());
    assert!(editor.add_edge(&a, &b).is_some());

    let structure = editor.export_structure();
    assert_eq!(structure[&a], vec![c, b]);
}

#[test]
fn payload_normalizes_config_id() {
    let mut editor = seeded_editor();
    let (a, _, _) = branch_flow(&mut editor);

    let payload = editor.structure_payload("client-1", "  My Test   Flow ");
    assert_eq!(payload.client_id, "client-1");
    assert_eq!(payload.config_id, "My_Test_Flow");
    assert_eq!(payload.structure, editor.export_structure());

    let json: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&payload).unwrap()).unwrap();
    assert_eq!(json["client_id"], "client-1");
    assert_eq!(json["config_id"], "My_Test_Flow");
    assert_eq!(json["structure"][START_KEY][0], a);
}
