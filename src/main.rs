use anyhow::Context;
use blockgraph::{export_to_path, load_graph, write_graph, GraphConfig, GraphSummary, Orientation};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Load a graph snapshot, print it back and inspect its adjacency matrix
#[derive(Parser, Debug)]
#[command(name = "blockgraph")]
#[command(about = "Inspect graph snapshot files", long_about = None)]
struct Args {
    /// Snapshot file to import
    input: PathBuf,

    /// Treat edges as undirected
    #[arg(long)]
    undirected: bool,

    /// Print the adjacency matrix
    #[arg(long)]
    matrix: bool,

    /// Print a JSON summary of the graph
    #[arg(long)]
    stats: bool,

    /// Write the snapshot here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with storage configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GraphConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {:?}", path))?;
            let config = serde_json::from_str(&text)
                .with_context(|| format!("parsing config {:?}", path))?;
            Ok(config)
        }
        None => Ok(GraphConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(args.config.as_ref())?;
    let orientation = if args.undirected {
        Orientation::Undirected
    } else {
        Orientation::Directed
    };

    info!("Loading {:?} as a {} graph", args.input, orientation);
    let graph = load_graph::<String, String, _>(orientation, config, &args.input)
        .with_context(|| format!("importing {:?}", args.input))?;
    info!("Loaded {} nodes and {} edges", graph.node_count(), graph.edge_count());

    match &args.output {
        Some(path) => {
            export_to_path(&graph, path).with_context(|| format!("exporting {:?}", path))?;
            info!("Snapshot written to {:?}", path);
        }
        None => write_graph(&graph, std::io::stdout().lock())?,
    }

    if args.matrix {
        println!();
        print!("{}", graph.edges().matrix());
    }

    if args.stats {
        println!("{}", serde_json::to_string_pretty(&GraphSummary::of(&graph))?);
    }

    Ok(())
}
