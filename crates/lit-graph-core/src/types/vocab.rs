//! Predicate vocabulary.
//!
//! All predicates the pipeline emits, resolved against the configured
//! namespace once at startup. The reification vocabulary lives under the
//! standard RDF namespace and does not move with the graph namespace.

use serde::{Deserialize, Serialize};

use crate::iri::{Iri, Namespace};

const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// The fixed predicate vocabulary, pre-resolved to full identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocab {
    // Character-to-concept relationships.
    pub exemplifies: Iri,
    pub struggles_with: Iri,
    pub questions: Iri,
    pub linked_to: Iri,
    // Type-specific overrides.
    pub symbolizes: Iri,
    pub contextualizes: Iri,
    // Provenance.
    pub is_mentioned_in: Iri,
    // Concept-to-concept relationships.
    pub related_to: Iri,
    pub criticizes: Iri,
    pub has_influence_on: Iri,
    pub extends: Iri,
    // Criticism-corpus association predicates (corpus-derived catalogs).
    pub has_criticism: Iri,
    pub has_definition: Iri,
    pub has_reference: Iri,
    pub has_example: Iri,
    // Reification and mention records.
    pub occurrence_count: Iri,
    pub mention_class: Iri,
    pub mention_subject: Iri,
    pub mention_predicate: Iri,
    pub mention_object: Iri,
    pub rdf_type: Iri,
    pub rdf_subject: Iri,
    pub rdf_predicate: Iri,
    pub rdf_object: Iri,
}

impl Vocab {
    /// Resolve the vocabulary against a namespace.
    pub fn new(ns: &Namespace) -> Self {
        Vocab {
            exemplifies: ns.iri("exemplifies"),
            struggles_with: ns.iri("strugglesWith"),
            questions: ns.iri("questions"),
            linked_to: ns.iri("linkedTo"),
            symbolizes: ns.iri("symbolizes"),
            contextualizes: ns.iri("contextualizes"),
            is_mentioned_in: ns.iri("isMentionedIn"),
            related_to: ns.iri("relatedTo"),
            criticizes: ns.iri("criticizes"),
            has_influence_on: ns.iri("hasInfluenceOn"),
            extends: ns.iri("extends"),
            has_criticism: ns.iri("hasCriticism"),
            has_definition: ns.iri("hasDefinition"),
            has_reference: ns.iri("hasReference"),
            has_example: ns.iri("hasExample"),
            occurrence_count: ns.iri("occurrenceCount"),
            mention_class: ns.iri("Mention"),
            mention_subject: ns.iri("subject"),
            mention_predicate: ns.iri("predicate"),
            mention_object: ns.iri("object"),
            rdf_type: Iri::new(format!("{RDF_NS}type")),
            rdf_subject: Iri::new(format!("{RDF_NS}subject")),
            rdf_predicate: Iri::new(format!("{RDF_NS}predicate")),
            rdf_object: Iri::new(format!("{RDF_NS}object")),
        }
    }

    /// The character-to-concept predicates the standard analyses filter on.
    pub fn interaction_predicates(&self) -> [&Iri; 3] {
        [&self.struggles_with, &self.linked_to, &self.questions]
    }

    /// The association predicates a corpus-derived catalog reads snippets from.
    pub fn association_predicates(&self) -> [&Iri; 4] {
        [
            &self.has_criticism,
            &self.has_definition,
            &self.has_reference,
            &self.has_example,
        ]
    }
}

impl Default for Vocab {
    fn default() -> Self {
        Vocab::new(&Namespace::default())
    }
}
