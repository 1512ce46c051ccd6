//! Error types for lit-graph-pipeline.

use thiserror::Error;

use lit_graph_core::CoreError;

/// Errors raised while building a knowledge graph.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A collaborator or validation failure from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The concept catalog file could not be read or parsed.
    ///
    /// Fatal at startup: without a catalog there is nothing to resolve
    /// against. An empty but well-formed catalog is not an error; it
    /// degrades resolution to `None` instead.
    #[error("failed to load concept catalog from {path}: {message}")]
    CatalogLoad {
        /// Path of the catalog file.
        path: String,
        /// Underlying failure description.
        message: String,
    },
}

/// Result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
