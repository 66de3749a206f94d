use clap::{Parser, Subcommand, ValueEnum};
use fractalgraph::{
    closure::Direction,
    element::NodeId,
    error::{ElementKind, FractalError, Result},
    generate::{RandomGraphParams, demo_graph, random_graph},
    graph::FractalGraph,
    statistics::Stats,
};
use serde::Serialize;
use std::{fmt::Display, path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Nested graph builder and exporter
#[derive(Parser, Debug)]
#[command(name = "fractalgraph")]
#[command(about = "Build nested (fractal) graphs and export them as DOT or JSON", long_about = None)]
struct Args {
    #[command(subcommand)]
    source: Source,

    /// File to write the export to (stdout when omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = Format::Dot, global = true)]
    format: Format,

    /// Slash-separated label path, from the root, of a node whose neighbors should be listed
    #[arg(long, global = true)]
    closure: Option<String>,

    /// Number of hops for the neighbor query
    #[arg(long, default_value_t = 1, global = true, allow_negative_numbers = true)]
    depth: i64,

    /// Arc direction for the neighbor query: in, out or all
    #[arg(long, default_value = "out", global = true)]
    direction: Direction,

    /// Log every structural mutation
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Source {
    /// The built-in three-level reference graph
    Demo,
    /// A seeded random nested graph
    Random {
        /// Nesting levels below the root
        #[arg(long, default_value_t = 2)]
        levels: usize,

        /// Children per container
        #[arg(long, default_value_t = 3)]
        fanout: usize,

        /// Probability of an arc between two ordered siblings
        #[arg(long, default_value_t = 0.5)]
        arc_probability: f64,

        /// Largest arc weight
        #[arg(long, default_value_t = 10)]
        max_weight: u32,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Dot,
    Json,
}

fn init_tracing(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // logs go to stderr so that an export printed on stdout stays clean
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn report_closure<T>(graph: &FractalGraph<T>, root: NodeId, args: &Args) -> Result<()> {
    let Some(path) = &args.closure else {
        return Ok(());
    };
    let node = graph
        .resolve_path(root, path)
        .ok_or_else(|| FractalError::NotFound {
            kind: ElementKind::Node,
            label: path.clone(),
            container: graph.label(root).unwrap_or_default().to_owned(),
        })?;

    let mut stats = Stats::new();
    let reached = graph.neighbor_closure(node, args.depth, args.direction, &mut stats)?;
    let mut labels: Vec<&str> = reached.iter().filter_map(|&id| graph.label(id)).collect();
    labels.sort_unstable();

    info!(
        node = %path,
        depth = args.depth,
        direction = %args.direction,
        "neighbors: {}",
        labels.join(", ")
    );
    stats.dump();
    Ok(())
}

fn emit<T: Display + Serialize>(graph: &FractalGraph<T>, root: NodeId, args: &Args) -> Result<()> {
    report_closure(graph, root, args)?;

    match (&args.output, args.format) {
        (Some(path), Format::Dot) => graph.save_dot(root, path)?,
        (Some(path), Format::Json) => graph.save_json(root, path)?,
        (None, Format::Dot) => print!("{}", graph.export_dot(root)?),
        (None, Format::Json) => println!("{}", graph.export_json(root)?),
    }

    if let Some(path) = &args.output {
        info!(
            path = %path.display(),
            nodes = graph.node_count(),
            arcs = graph.arc_count(),
            "export written"
        );
    }
    Ok(())
}

fn execute(args: &Args) -> Result<()> {
    match args.source {
        Source::Demo => {
            let (graph, root) = demo_graph()?;
            emit(&graph, root, args)
        }
        Source::Random {
            levels,
            fanout,
            arc_probability,
            max_weight,
            seed,
        } => {
            let params = RandomGraphParams::new(levels, fanout, arc_probability, max_weight, seed);
            let (graph, root) = random_graph(params)?;
            emit(&graph, root, args)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
