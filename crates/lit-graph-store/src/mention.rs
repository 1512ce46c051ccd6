//! Mention-node representation of observations.
//!
//! Instead of a bare `(character, relation, concept)` triple, an
//! observation can be recorded as its own typed node with subject,
//! predicate, and object arcs. Both representations are valid storage
//! strategies; the query engine evaluates over either.

use lit_graph_core::iri::Iri;
use lit_graph_core::types::{Term, Triple, Vocab};

use crate::store::TripleStore;

/// Record one observation as a typed mention node.
///
/// Inserts four triples anchored at a fresh anonymous node labeled
/// `label`:
///
/// ```text
/// _:label rdf:type     ex:Mention .
/// _:label ex:subject   <character> .
/// _:label ex:predicate <relation> .
/// _:label ex:object    <concept> .
/// ```
///
/// Labels must be unique per observation (the pipeline numbers them
/// sequentially); reusing a label collapses observations.
pub fn add_mention_record(
    store: &mut TripleStore,
    vocab: &Vocab,
    label: impl Into<String>,
    subject: &Iri,
    relation: &Iri,
    object: &Iri,
) -> Term {
    let anchor = Term::blank(label.into());
    store.insert(Triple::new(
        anchor.clone(),
        vocab.rdf_type.clone(),
        vocab.mention_class.clone(),
    ));
    store.insert(Triple::new(
        anchor.clone(),
        vocab.mention_subject.clone(),
        subject.clone(),
    ));
    store.insert(Triple::new(
        anchor.clone(),
        vocab.mention_predicate.clone(),
        relation.clone(),
    ));
    store.insert(Triple::new(
        anchor.clone(),
        vocab.mention_object.clone(),
        object.clone(),
    ));
    anchor
}
