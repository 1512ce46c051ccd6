//! Typed query AST and result rows.
//!
//! Result rows are typed, ordered mappings from bound-variable name to
//! value; nothing downstream addresses a row by guessed position.

use lit_graph_core::iri::Iri;
use lit_graph_core::types::{Literal, Term};
use std::cmp::Ordering;
use std::fmt;

/// A subject, predicate, or object slot in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermPattern {
    /// A variable, by name without the `?`.
    Var(String),
    /// A fixed node the slot must equal.
    Const(Term),
}

impl TermPattern {
    pub fn var(name: impl Into<String>) -> Self {
        TermPattern::Var(name.into())
    }

    pub fn iri(iri: Iri) -> Self {
        TermPattern::Const(Term::Iri(iri))
    }
}

/// One triple pattern. Patterns sharing a variable join on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: TermPattern,
    pub predicate: TermPattern,
    pub object: TermPattern,
}

/// Restriction of a variable to a fixed predicate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateFilter {
    pub var: String,
    pub allowed: Vec<Iri>,
}

/// Aggregation over grouped rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregate {
    /// `COUNT(*)` (or `COUNT(?var)`, which counts the same rows).
    Count { alias: String },
    /// `SUM(?var)` over integer bindings.
    Sum { var: String, alias: String },
}

impl Aggregate {
    pub fn alias(&self) -> &str {
        match self {
            Aggregate::Count { alias } => alias,
            Aggregate::Sum { alias, .. } => alias,
        }
    }
}

/// One `ORDER BY` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderKey {
    /// Result column to sort on.
    pub column: String,
    pub descending: bool,
}

/// A parsed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Projected variables, in selection order, excluding the aggregate.
    pub select: Vec<String>,
    pub patterns: Vec<TriplePattern>,
    pub filter: Option<PredicateFilter>,
    pub group_by: Vec<String>,
    pub aggregate: Option<Aggregate>,
    pub order_by: Vec<OrderKey>,
}

/// A value bound in a result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Term(Term),
    /// An aggregate result.
    Number(u64),
}

impl Value {
    /// Integer view, for `SUM` and numeric sorting.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Term(Term::Literal(Literal::Integer(n))) => Some(*n),
            _ => None,
        }
    }

    /// Human-facing rendering: local names for identifiers, lexical forms
    /// for literals.
    pub fn display_string(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::Term(Term::Iri(iri)) => iri.local_name().to_string(),
            Value::Term(Term::Blank(label)) => format!("_:{label}"),
            Value::Term(Term::Literal(lit)) => lit.lexical_form(),
        }
    }

    /// Total order used by `ORDER BY`: numbers before terms, numbers
    /// numerically, terms by their full string form.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.sort_key().cmp(&other.sort_key()),
        }
    }

    fn sort_key(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::Term(Term::Iri(iri)) => iri.as_str().to_string(),
            Value::Term(Term::Blank(label)) => format!("_:{label}"),
            Value::Term(Term::Literal(lit)) => lit.lexical_form(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

/// A typed result row: ordered `(column, value)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Row { columns }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, v)| v)
    }

    pub fn columns(&self) -> &[(String, Value)] {
        &self.columns
    }
}
