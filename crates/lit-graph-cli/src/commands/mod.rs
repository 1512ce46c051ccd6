//! Command implementations.

pub mod analyze;
pub mod build;
pub mod query;
pub mod reify;
pub mod stats;

use anyhow::Context;
use lit_graph_core::Config;

/// Load configuration, from an explicit file when given, otherwise from
/// the layered `config/` + environment sources.
pub fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path).with_context(|| format!("loading config {path}"))?,
        None => Config::load().context("loading configuration")?,
    };
    Ok(config)
}
