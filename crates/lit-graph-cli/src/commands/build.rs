//! Graph building commands.

use anyhow::{bail, Context};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use lit_graph_core::Config;
use lit_graph_pipeline::providers::{InferenceClient, LexiconEntityExtractor};
use lit_graph_pipeline::{ConceptCatalog, CriticismDocument, GraphPipeline, Providers, RunSummary};
use lit_graph_store::{ntriples, TripleStore};

#[derive(Args)]
pub struct BuildNovelArgs {
    /// Passage-per-line novel text file.
    #[arg(long)]
    pub input: PathBuf,
    /// Output graph file.
    #[arg(long)]
    pub output: PathBuf,
    /// Derive the concept catalog from this criticism graph instead of
    /// the configured catalog file.
    #[arg(long)]
    pub criticism_graph: Option<PathBuf>,
    /// Record entity observations as typed mention nodes.
    #[arg(long)]
    pub mention_records: bool,
    /// Write a JSON run summary here.
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildCriticismArgs {
    /// Directory of criticism essays (`c-*.txt`).
    #[arg(long)]
    pub input_dir: PathBuf,
    /// Output graph file.
    #[arg(long)]
    pub output: PathBuf,
    /// Write a JSON run summary here.
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

fn providers(config: &Config) -> anyhow::Result<Providers> {
    let client =
        Arc::new(InferenceClient::new(&config.inference).context("building inference client")?);
    Ok(Providers {
        embedder: client.clone(),
        relevance: client,
        extractor: Arc::new(LexiconEntityExtractor::new(&config.extractor)),
    })
}

fn load_catalog(config: &Config, criticism_graph: Option<&Path>) -> anyhow::Result<ConceptCatalog> {
    let ns = config.namespace();
    if let Some(path) = criticism_graph {
        let store = ntriples::load(path)
            .with_context(|| format!("loading criticism graph {}", path.display()))?;
        let vocab = lit_graph_core::types::Vocab::new(&ns);
        return Ok(ConceptCatalog::from_criticism_graph(&store, &vocab));
    }
    match &config.catalog.path {
        Some(path) => ConceptCatalog::load_toml(&ns, path)
            .with_context(|| format!("loading catalog {}", path.display())),
        None => bail!("no concept catalog configured; set catalog.path or pass --criticism-graph"),
    }
}

fn write_summary(path: Option<&Path>, summary: &RunSummary) -> anyhow::Result<()> {
    if let Some(path) = path {
        let json = serde_json::to_string_pretty(summary).context("serializing run summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing summary {}", path.display()))?;
    }
    Ok(())
}

pub async fn build_novel(args: BuildNovelArgs, config: &Config) -> anyhow::Result<()> {
    let catalog = load_catalog(config, args.criticism_graph.as_deref())?;
    let pipeline = GraphPipeline::new(providers(config)?, catalog, config)
        .await?
        .with_mention_records(args.mention_records);

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let mut store = TripleStore::new();
    let summary = pipeline
        .run(&mut store, text.lines().map(str::to_string))
        .await;

    ntriples::save(&store, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        output = %args.output.display(),
        triples = store.len(),
        "novel graph written"
    );
    write_summary(args.summary.as_deref(), &summary)
}

pub async fn build_criticism(args: BuildCriticismArgs, config: &Config) -> anyhow::Result<()> {
    let catalog = match &config.catalog.path {
        Some(path) => ConceptCatalog::load_toml(&config.namespace(), path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => bail!("no concept catalog configured; set catalog.path"),
    };
    let pipeline = GraphPipeline::new(providers(config)?, catalog, config).await?;

    let mut documents = Vec::new();
    let entries = std::fs::read_dir(&args.input_dir)
        .with_context(|| format!("reading {}", args.input_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.starts_with("c-") || !name.ends_with(".txt") {
            continue;
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        documents.push(CriticismDocument::new(name.trim_end_matches(".txt"), text));
    }
    // Directory order is platform-dependent; a stable order keeps runs
    // reproducible.
    documents.sort_by(|a, b| a.name.cmp(&b.name));
    if documents.is_empty() {
        bail!(
            "no criticism files (c-*.txt) found in {}",
            args.input_dir.display()
        );
    }

    let mut store = TripleStore::new();
    let summary = pipeline.run_criticism(&mut store, documents).await;

    ntriples::save(&store, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        output = %args.output.display(),
        triples = store.len(),
        "criticism graph written"
    );
    write_summary(args.summary.as_deref(), &summary)
}
