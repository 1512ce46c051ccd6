//! The `reify` command.

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use lit_graph_core::types::Vocab;
use lit_graph_core::Config;
use lit_graph_store::ntriples;

#[derive(Args)]
pub struct ReifyArgs {
    /// Input graph file.
    #[arg(long)]
    pub input: PathBuf,
    /// Output graph file with reified occurrence counts appended.
    #[arg(long)]
    pub output: PathBuf,
}

pub fn run(args: ReifyArgs, config: &Config) -> anyhow::Result<()> {
    let store = ntriples::load(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let vocab = Vocab::new(&config.namespace());
    ntriples::save_reified(&store, &vocab, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        statements = store.len(),
        "reified graph written"
    );
    Ok(())
}
