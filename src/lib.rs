//! # Keiro - Flow Graph Editor Core
//!
//! **Keiro** is a headless, embeddable editor for bot-orchestration flow
//! graphs: a mutable directed graph of nodes (references to external bot
//! entities) and edges (execution links), with pointer-driven editing,
//! deterministic hit-testing, and two serialization surfaces.
//!
//! ## Core Workflow
//!
//! The crate is rendering-technology-agnostic. A host embeds a
//! [`FlowEditor`](editor::FlowEditor), routes raw pointer events into
//! it, and repaints from a [`Scene`](scene::Scene) display list:
//!
//! 1.  **Create**: `FlowEditor::new(canvas_size)` seeds a graph with the
//!     START/END sentinels.
//! 2.  **Edit**: `on_pointer_down/move/up` translate presses into drag,
//!     connect, and selection; `add_node` spawns nodes from a bot
//!     registry.
//! 3.  **Render**: whenever `take_redraw()` reports a change, build a
//!     `Scene` and paint it with whatever surface the host has.
//! 4.  **Export**: `export_visual()` for round-trip persistence,
//!     `export_structure()` for the adjacency mapping the orchestration
//!     backend executes.
//!
//! ## Quick Start
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! // A 1200x700 canvas; the seed makes node placement reproducible.
//! let mut editor = FlowEditor::with_seed(Size::new(1200.0, 700.0), 42);
//!
//! // Nodes denormalize the bot registry entries they represent.
//! let analyst = editor.add_node("bot-17", "Data Analyst", "Processes input", 0);
//! let writer = editor.add_node("bot-23", "Content Writer", "Generates copy", 1);
//!
//! // Wire START -> analyst -> writer -> END.
//! editor.add_edge(START_NODE_ID, &analyst);
//! editor.add_edge(&analyst, &writer);
//! editor.add_edge(&writer, END_NODE_ID);
//!
//! // The backend sees reserved tokens, not internal sentinel ids.
//! let structure = editor.export_structure();
//! assert_eq!(structure[START_KEY], vec![analyst.clone()]);
//! assert_eq!(structure[&writer], vec![END_TOKEN.to_string()]);
//!
//! // The visual snapshot round-trips the full graph.
//! let snapshot = editor.export_visual();
//! editor.import_visual(snapshot.clone()).unwrap();
//! assert_eq!(editor.export_visual(), snapshot);
//! ```

pub mod editor;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod palette;
pub mod prelude;
pub mod scene;
pub mod snapshot;
pub mod structure;
