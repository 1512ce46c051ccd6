//! The `analyze` command.

use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use lit_graph_core::types::Vocab;
use lit_graph_core::Config;
use lit_graph_query::analytics;
use lit_graph_query::export;
use lit_graph_store::{ntriples, TripleStore};

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub analysis: Analysis,
}

#[derive(Subcommand)]
pub enum Analysis {
    /// Character-relation-concept interaction counts.
    Interactions {
        /// Novel graph file.
        #[arg(long)]
        graph: PathBuf,
        /// Output CSV path.
        #[arg(long)]
        output: PathBuf,
    },
    /// Each character's top-N interactions by count.
    Top {
        #[arg(long)]
        graph: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Override the configured N.
        #[arg(long)]
        n: Option<usize>,
    },
    /// Concept mention counts across the criticism and novel graphs.
    Mentions {
        #[arg(long)]
        criticism_graph: PathBuf,
        #[arg(long)]
        novel_graph: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Character-to-character thematic correlation matrix.
    Correlation {
        #[arg(long)]
        graph: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn load(path: &Path) -> anyhow::Result<TripleStore> {
    ntriples::load(path).with_context(|| format!("loading {}", path.display()))
}

fn folded_interactions(
    store: &TripleStore,
    vocab: &Vocab,
    config: &Config,
) -> Vec<analytics::InteractionRow> {
    let rows = analytics::interaction_counts(store, vocab);
    analytics::fold_aliases(&rows, &config.analysis.character_aliases)
}

pub fn run(args: AnalyzeArgs, config: &Config) -> anyhow::Result<()> {
    let vocab = Vocab::new(&config.namespace());

    match args.analysis {
        Analysis::Interactions { graph, output } => {
            let store = load(&graph)?;
            let rows = folded_interactions(&store, &vocab, config);
            export::write_interactions(&output, &rows)?;
        }
        Analysis::Top { graph, output, n } => {
            let store = load(&graph)?;
            let rows = folded_interactions(&store, &vocab, config);
            let top = analytics::top_interactions(&rows, n.unwrap_or(config.analysis.top_n));
            export::write_interactions(&output, &top)?;
        }
        Analysis::Mentions {
            criticism_graph,
            novel_graph,
            output,
        } => {
            let criticism = analytics::concept_mention_counts(&load(&criticism_graph)?, &vocab);
            let novel = analytics::concept_mention_counts(&load(&novel_graph)?, &vocab);
            let rows = analytics::mention_comparison(&criticism, &novel);
            export::write_mention_comparison(&output, &rows)?;
        }
        Analysis::Correlation { graph, output } => {
            let store = load(&graph)?;
            let rows = folded_interactions(&store, &vocab, config);
            let matrix = analytics::correlation_matrix(&rows);
            export::write_correlation(&output, &matrix)?;
        }
    }
    Ok(())
}
