//! Pattern queries and aggregation analytics over the triple store.
//!
//! The query language is a small declarative subset: one or more triple
//! patterns with variables, a `FILTER ?var IN (...)` clause, `GROUP BY`
//! with `COUNT(*)` or `SUM(?var)`, and a stable multi-key `ORDER BY`.
//! Anything outside that subset fails with a [`QueryError`] instead of
//! silently returning partial results.
//!
//! On top of raw query results, the analytics module derives the standard
//! tables: top-N interactions per character, concept mention comparisons,
//! and the character correlation matrix.

pub mod analytics;
pub mod ast;
pub mod error;
pub mod eval;
pub mod export;
pub mod parser;

pub use ast::{Aggregate, OrderKey, PredicateFilter, Query, Row, TermPattern, TriplePattern, Value};
pub use error::{QueryError, QueryResult};
pub use eval::evaluate;
pub use parser::parse_query;
