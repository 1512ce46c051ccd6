//! Relationship classification.
//!
//! Assigns a typed predicate between two graph nodes from lexical cues in
//! the passage text, with type-specific overrides for some entity kinds
//! and an embedding-similarity path for concept-to-concept inference.

use lit_graph_core::iri::Iri;
use lit_graph_core::types::{EntityKind, Vocab};

/// Lexical cue groups for character-to-concept classification, in
/// precedence order. First match wins.
const EXEMPLIFIES_CUES: [&str; 3] = ["exemplify", "represent", "demonstrate"];
const STRUGGLES_CUES: [&str; 3] = ["struggle", "conflict", "resist"];
const QUESTIONS_CUES: [&str; 3] = ["question", "doubt", "uncertain"];

/// Cue groups for concept-to-concept classification.
const CRITICIZES_CUES: [&str; 2] = ["criticize", "challenge"];
const INFLUENCE_CUES: [&str; 2] = ["influence", "impact"];
const EXTENDS_CUES: [&str; 2] = ["extend", "expand"];

/// Classifies relationships between graph nodes.
#[derive(Debug, Clone)]
pub struct RelationshipClassifier {
    vocab: Vocab,
    /// Concept pairs at least this similar are `relatedTo` outright.
    relatedness_threshold: f32,
}

impl RelationshipClassifier {
    pub fn new(vocab: Vocab, relatedness_threshold: f32) -> Self {
        RelationshipClassifier {
            vocab,
            relatedness_threshold,
        }
    }

    /// Classify a character-to-concept relationship from passage text.
    ///
    /// Total: falls back to `linkedTo` when no cue matches.
    pub fn classify_interaction(&self, text: &str) -> Iri {
        let lower = text.to_lowercase();
        if contains_any(&lower, &EXEMPLIFIES_CUES) {
            self.vocab.exemplifies.clone()
        } else if contains_any(&lower, &STRUGGLES_CUES) {
            self.vocab.struggles_with.clone()
        } else if contains_any(&lower, &QUESTIONS_CUES) {
            self.vocab.questions.clone()
        } else {
            self.vocab.linked_to.clone()
        }
    }

    /// The fixed predicate for an entity kind, bypassing the lexical
    /// classifier, if the kind has one.
    ///
    /// Androids always struggle with their concept, animals symbolize it,
    /// locations contextualize it. Humans have no override and go through
    /// [`classify_interaction`](Self::classify_interaction).
    pub fn override_for_kind(&self, kind: EntityKind) -> Option<&Iri> {
        match kind {
            EntityKind::Android => Some(&self.vocab.struggles_with),
            EntityKind::Animal => Some(&self.vocab.symbolizes),
            EntityKind::Location => Some(&self.vocab.contextualizes),
            EntityKind::Human => None,
        }
    }

    /// The predicate linking an entity of the given kind to its concept.
    pub fn predicate_for(&self, kind: EntityKind, text: &str) -> Iri {
        match self.override_for_kind(kind) {
            Some(predicate) => predicate.clone(),
            None => self.classify_interaction(text),
        }
    }

    /// Classify the relationship between two concepts.
    ///
    /// High embedding similarity wins outright; otherwise the source text
    /// is inspected for cues, and `relatedTo` is the default.
    pub fn classify_concept_pair(&self, similarity: f32, text: &str) -> Iri {
        if similarity > self.relatedness_threshold {
            return self.vocab.related_to.clone();
        }
        let lower = text.to_lowercase();
        if contains_any(&lower, &CRITICIZES_CUES) {
            self.vocab.criticizes.clone()
        } else if contains_any(&lower, &INFLUENCE_CUES) {
            self.vocab.has_influence_on.clone()
        } else if contains_any(&lower, &EXTENDS_CUES) {
            self.vocab.extends.clone()
        } else {
            self.vocab.related_to.clone()
        }
    }
}

fn contains_any(lower_text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| lower_text.contains(cue))
}
