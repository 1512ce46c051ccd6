//! Error types for lit-graph-query.

use thiserror::Error;

/// Errors raised while parsing or evaluating a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query text could not be parsed at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// The query parsed but uses a construct outside the supported subset.
    #[error("unsupported construct: {0}")]
    Unsupported(String),

    /// A clause references a variable the pattern never binds.
    #[error("unknown variable ?{0}")]
    UnknownVariable(String),

    /// An aggregate was applied to values it cannot handle.
    #[error("cannot aggregate: {0}")]
    BadAggregate(String),
}

/// Result alias for query operations.
pub type QueryResult<T> = Result<T, QueryError>;
