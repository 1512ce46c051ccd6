//! Reification of insertion counts.
//!
//! Reification attaches an occurrence count to each distinct triple without
//! collapsing or altering the base facts. Each count hangs off a fresh
//! anonymous node carrying `rdf:subject`, `rdf:predicate`, `rdf:object`,
//! and `occurrenceCount` arcs, the standard RDF reification shape.

use lit_graph_core::types::{Term, Triple, Vocab};

use crate::store::TripleStore;

/// A reified occurrence count for one distinct triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReifiedStatement {
    /// Label of the anonymous statement node, e.g. `m3`.
    pub anchor: String,
    /// The base triple being annotated.
    pub triple: Triple,
    /// How many times the triple was inserted.
    pub occurrence_count: u64,
}

impl ReifiedStatement {
    /// Expand into the four triples that express this record.
    pub fn to_triples(&self, vocab: &Vocab) -> [Triple; 4] {
        let anchor = Term::blank(self.anchor.clone());
        [
            Triple::new(
                anchor.clone(),
                vocab.rdf_subject.clone(),
                self.triple.subject.clone(),
            ),
            Triple::new(
                anchor.clone(),
                vocab.rdf_predicate.clone(),
                Term::Iri(self.triple.predicate.clone()),
            ),
            Triple::new(
                anchor.clone(),
                vocab.rdf_object.clone(),
                self.triple.object.clone(),
            ),
            Triple::new(
                anchor,
                vocab.occurrence_count.clone(),
                Term::integer(self.occurrence_count),
            ),
        ]
    }
}

impl TripleStore {
    /// Compute the reified occurrence counts for every distinct triple.
    ///
    /// Anchors are assigned in first-insertion order (`m0`, `m1`, ...), so
    /// the output is deterministic and running it twice yields the same
    /// records. The base triples are not modified.
    pub fn reify(&self) -> Vec<ReifiedStatement> {
        self.iter()
            .enumerate()
            .map(|(i, triple)| ReifiedStatement {
                anchor: format!("m{i}"),
                triple: triple.clone(),
                occurrence_count: self.count(triple),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lit_graph_core::iri::Namespace;
    use lit_graph_core::types::Literal;

    #[test]
    fn reify_reports_multiplicity() {
        let ns = Namespace::default();
        let mut store = TripleStore::new();
        let t = Triple::new(ns.iri("Deckard"), ns.iri("linkedTo"), ns.iri("Posthumanism"));
        store.insert(t.clone());
        store.insert(t.clone());

        let reified = store.reify();
        assert_eq!(reified.len(), 1);
        assert_eq!(reified[0].anchor, "m0");
        assert_eq!(reified[0].occurrence_count, 2);
        assert_eq!(reified[0].triple, t);
    }

    #[test]
    fn reify_is_idempotent() {
        let ns = Namespace::default();
        let mut store = TripleStore::new();
        store.insert(Triple::new(
            ns.iri("Isidore"),
            ns.iri("questions"),
            ns.iri("Animal Ethics"),
        ));
        store.insert(Triple::new(
            ns.iri("Rachael"),
            ns.iri("strugglesWith"),
            ns.iri("Cyborg Theory"),
        ));

        assert_eq!(store.reify(), store.reify());
    }

    #[test]
    fn reified_statement_expands_to_four_triples() {
        let ns = Namespace::default();
        let vocab = Vocab::default();
        let record = ReifiedStatement {
            anchor: "m0".to_string(),
            triple: Triple::new(ns.iri("Deckard"), ns.iri("linkedTo"), ns.iri("Posthumanism")),
            occurrence_count: 7,
        };

        let triples = record.to_triples(&vocab);
        assert_eq!(triples.len(), 4);
        assert!(triples
            .iter()
            .all(|t| t.subject == Term::blank("m0")));
        assert_eq!(
            triples[3].object,
            Term::Literal(Literal::Integer(7))
        );
    }
}
