//! The `query` command.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

use lit_graph_query::{evaluate, parse_query};
use lit_graph_store::{ntriples, TripleStore};

#[derive(Args)]
pub struct QueryArgs {
    /// Graph files to query; several files are merged into one store.
    #[arg(long, required = true, num_args = 1..)]
    pub graph: Vec<PathBuf>,
    /// Query text, or `@path` to read it from a file.
    pub query: String,
}

pub fn run(args: QueryArgs) -> anyhow::Result<()> {
    let mut store = TripleStore::new();
    for path in &args.graph {
        ntriples::load_into(&mut store, path)
            .with_context(|| format!("loading {}", path.display()))?;
    }

    let query_text = match args.query.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading query file {path}"))?
        }
        None => args.query.clone(),
    };

    let query = parse_query(&query_text)?;
    let rows = evaluate(&store, &query)?;

    for row in &rows {
        let rendered: Vec<String> = row
            .columns()
            .iter()
            .map(|(name, value)| format!("{name}={}", value.display_string()))
            .collect();
        println!("{}", rendered.join("\t"));
    }
    eprintln!("{} rows", rows.len());
    Ok(())
}
