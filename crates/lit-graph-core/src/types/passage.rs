//! Source text passages.

use serde::{Deserialize, Serialize};

use crate::iri::{Iri, Namespace};

/// A unit of source text with a stable positional identifier.
///
/// The identifier is used as provenance when emitting mention facts, so a
/// concept observed in the same passage twice counts twice under
/// reification while the base triple stays deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Zero-based position in the source corpus.
    pub index: usize,
    /// The passage text, after cleanup.
    pub text: String,
}

impl Passage {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Passage {
            index,
            text: text.into(),
        }
    }

    /// Stable node identifier for this passage, e.g. `passage_17`.
    pub fn node(&self, ns: &Namespace) -> Iri {
        ns.iri(&format!("passage_{}", self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passage_node_is_positional() {
        let ns = Namespace::default();
        let p = Passage::new(17, "The android fled.");
        assert_eq!(p.node(&ns).local_name(), "passage_17");
    }
}
