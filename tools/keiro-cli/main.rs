use clap::Parser;
use keiro::prelude::*;

/// Converts a saved flow snapshot into the backend structure format
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the flow snapshot JSON file (a `Save`/`Export` download)
    snapshot_path: String,

    /// Emit the full POST /bot-structure payload instead of the bare
    /// adjacency mapping
    #[arg(short, long)]
    payload: bool,

    /// Client id to stamp into the payload
    #[arg(long, default_value = "local")]
    client_id: String,

    /// Human flow name; normalized into the payload's config_id
    #[arg(long, default_value = "Untitled Flow")]
    flow_name: String,

    /// Print node/edge counts to stderr alongside the output
    #[arg(short, long)]
    stats: bool,
}

fn main() {
    let cli = Cli::parse();

    let snapshot = VisualSnapshot::from_file(&cli.snapshot_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load snapshot '{}': {}",
            cli.snapshot_path, e
        ))
    });

    let mut graph = FlowGraph::new(Size::new(1200.0, 700.0));
    graph
        .import_visual(snapshot)
        .unwrap_or_else(|e| exit_with_error(&format!("Snapshot rejected: {}", e)));

    if cli.stats {
        eprintln!(
            "Loaded flow: {} nodes (sentinels included), {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        let branch_points = graph
            .nodes()
            .iter()
            .filter(|n| graph.out_degree(&n.id) > 1)
            .count();
        eprintln!("Branch points: {}", branch_points);
    }

    let json = if cli.payload {
        let payload = StructurePayload::new(cli.client_id, &cli.flow_name, &graph);
        serde_json::to_string_pretty(&payload)
    } else {
        serde_json::to_string_pretty(&graph.export_structure())
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Serialization failed: {}", e)));

    println!("{}", json);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
