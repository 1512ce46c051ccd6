//! Error types for lit-graph-store.

use thiserror::Error;

/// Errors raised by the triple store and its serialization.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A serialized graph file contained a malformed statement.
    ///
    /// Fatal for that file's load; an already-populated in-memory store is
    /// never touched by a failed load.
    #[error("syntax error at line {line}: {message}")]
    Syntax {
        /// One-based line number of the offending statement.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// Reading or writing a graph file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// The file involved.
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
