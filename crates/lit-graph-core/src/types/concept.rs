//! Canonical catalog concepts.

use serde::{Deserialize, Serialize};

use crate::iri::Iri;

/// A canonical catalog node representing an abstract theme or topic.
///
/// Concepts are immutable once the catalog is loaded, and exactly one
/// concept exists per canonical identifier. The definition text is what
/// gets embedded for similarity matching; the embedding itself lives in the
/// catalog's embedding table, computed once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// Canonical identifier, minted from the label.
    pub iri: Iri,
    /// Human-readable label, e.g. "Cyborg Theory".
    pub label: String,
    /// Free-text definition used for embedding-based matching.
    pub definition: String,
    /// Alternative surface forms that should resolve to this concept.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Concept {
    pub fn new(iri: Iri, label: impl Into<String>, definition: impl Into<String>) -> Self {
        Concept {
            iri,
            label: label.into(),
            definition: definition.into(),
            aliases: Vec::new(),
        }
    }
}
