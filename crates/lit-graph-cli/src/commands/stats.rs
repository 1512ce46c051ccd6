//! The `stats` command.

use anyhow::Context;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;

use lit_graph_store::ntriples;

#[derive(Args)]
pub struct StatsArgs {
    /// Graph file to summarize.
    pub graph: PathBuf,
}

pub fn run(args: StatsArgs) -> anyhow::Result<()> {
    let store = ntriples::load(&args.graph)
        .with_context(|| format!("loading {}", args.graph.display()))?;

    let mut by_predicate: BTreeMap<String, usize> = BTreeMap::new();
    for triple in store.iter() {
        *by_predicate
            .entry(triple.predicate.local_name().to_string())
            .or_default() += 1;
    }

    println!("triples: {}", store.len());
    for (predicate, count) in by_predicate {
        println!("  {predicate}: {count}");
    }
    Ok(())
}
