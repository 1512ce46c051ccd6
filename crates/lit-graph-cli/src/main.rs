//! lit-graph CLI.
//!
//! Builds literary knowledge graphs from narrative and criticism corpora
//! and runs the standard queries and analyses over them.
//!
//! # Commands
//!
//! - `build-novel`: relevance-gate passages, resolve concepts, extract
//!   entities, and emit relationship triples
//! - `build-criticism`: build the criticism-side graph with
//!   concept-to-concept relationships
//! - `reify`: annotate a graph file with occurrence counts
//! - `query`: run a query from the supported pattern language
//! - `analyze`: produce the CSV tables (interactions, top-N, mention
//!   comparison, correlation matrix)
//! - `stats`: print triple counts for a graph file

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

pub use error::exit_code_for;

/// lit-graph - literary knowledge graph extraction and analysis.
#[derive(Parser)]
#[command(name = "lit-graph")]
#[command(version = "0.1.0")]
#[command(about = "Build and query literary knowledge graphs")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration TOML file.
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the novel graph from a passage-per-line text file
    BuildNovel(commands::build::BuildNovelArgs),
    /// Build the criticism graph from a directory of essay files
    BuildCriticism(commands::build::BuildCriticismArgs),
    /// Add reified occurrence counts to a graph file
    Reify(commands::reify::ReifyArgs),
    /// Evaluate a query against one or more graph files
    Query(commands::query::QueryArgs),
    /// Produce the standard analysis tables as CSV
    Analyze(commands::analyze::AnalyzeArgs),
    /// Print triple counts for a graph file
    Stats(commands::stats::StatsArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_target(false).init();

    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::BuildNovel(args) => commands::build::build_novel(args, &config).await,
        Commands::BuildCriticism(args) => commands::build::build_criticism(args, &config).await,
        Commands::Reify(args) => commands::reify::run(args, &config),
        Commands::Query(args) => commands::query::run(args),
        Commands::Analyze(args) => commands::analyze::run(args, &config),
        Commands::Stats(args) => commands::stats::run(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(exit_code_for(&err));
    }
}
