//! Graph terms and triples.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::iri::Iri;

/// A literal value appearing in object position.
///
/// Only the two lexical forms the graph actually produces are modeled:
/// plain text and integers (reified occurrence counts).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Literal {
    Text(String),
    Integer(u64),
}

impl Literal {
    pub fn lexical_form(&self) -> String {
        match self {
            Literal::Text(s) => s.clone(),
            Literal::Integer(n) => n.to_string(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(s) => write!(f, "{s}"),
            Literal::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// A node in subject or object position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// A named node under the graph namespace (or the RDF vocabulary).
    Iri(Iri),
    /// An anonymous node, identified by a graph-local label.
    Blank(String),
    /// A literal value. Only valid in object position.
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: Iri) -> Self {
        Term::Iri(iri)
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::Blank(label.into())
    }

    pub fn integer(n: u64) -> Self {
        Term::Literal(Literal::Integer(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Term::Literal(Literal::Text(s.into()))
    }

    /// The named-node identifier, if this term is one.
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

/// A subject-predicate-object fact.
///
/// Triples are unordered-set members: the store deduplicates on the full
/// `(subject, predicate, object)` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<Term>, predicate: Iri, object: impl Into<Term>) -> Self {
        Triple {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            term_label(&self.subject),
            self.predicate.local_name(),
            term_label(&self.object)
        )
    }
}

fn term_label(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri.local_name().to_string(),
        Term::Blank(label) => format!("_:{label}"),
        Term::Literal(lit) => lit.lexical_form(),
    }
}
