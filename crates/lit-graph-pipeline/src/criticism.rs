//! Criticism-corpus graph building.
//!
//! Criticism documents are processed whole: candidate phrases are mapped
//! to catalog concepts through the thresholded resolver, each mapped
//! concept gets a mention fact anchored at the document, and every
//! unordered pair of mapped concepts gets a relationship inferred from
//! embedding similarity and textual cues.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use lit_graph_core::iri::Iri;
use lit_graph_core::types::Triple;
use lit_graph_store::TripleStore;

use crate::error::PipelineResult;
use crate::pipeline::{GraphPipeline, RunSummary};
use crate::text::clean_text;

/// One criticism document, named by its file stem.
#[derive(Debug, Clone)]
pub struct CriticismDocument {
    /// Provenance name, e.g. `c-haraway-1985`.
    pub name: String,
    pub text: String,
}

impl CriticismDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        CriticismDocument {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// What happened to one criticism document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOutcome {
    Irrelevant,
    NoConcept,
    Processed {
        /// Concepts mapped from candidate phrases.
        concepts: usize,
        /// Concept-pair relationship facts emitted.
        relationships: usize,
    },
}

impl GraphPipeline {
    /// Process a batch of criticism documents.
    ///
    /// Mirrors [`run`](GraphPipeline::run): per-document failures are
    /// logged, counted, and skipped.
    pub async fn run_criticism<I>(&self, store: &mut TripleStore, documents: I) -> RunSummary
    where
        I: IntoIterator<Item = CriticismDocument>,
    {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let insertions_before = store.total_insertions();

        let mut total = 0;
        let mut relevant = 0;
        let mut without_concept = 0;
        let mut failed = 0;

        for document in documents {
            total += 1;
            match self.ingest_criticism(store, &document).await {
                Ok(DocumentOutcome::Irrelevant) => {}
                Ok(DocumentOutcome::NoConcept) => {
                    relevant += 1;
                    without_concept += 1;
                }
                Ok(DocumentOutcome::Processed {
                    concepts,
                    relationships,
                }) => {
                    relevant += 1;
                    debug!(document = %document.name, concepts, relationships, "document processed");
                }
                Err(err) => {
                    warn!(document = %document.name, error = %err, "skipping failed document");
                    failed += 1;
                }
            }
        }

        let summary = RunSummary {
            run_id,
            started_at,
            finished_at: Utc::now(),
            passages_total: total,
            passages_relevant: relevant,
            passages_without_concept: without_concept,
            passages_failed: failed,
            triples_added: store.total_insertions() - insertions_before,
            distinct_triples: store.len(),
        };
        info!(
            %run_id,
            documents = summary.passages_total,
            failed = summary.passages_failed,
            triples = summary.distinct_triples,
            "criticism run finished"
        );
        summary
    }

    /// Process one criticism document.
    pub async fn ingest_criticism(
        &self,
        store: &mut TripleStore,
        document: &CriticismDocument,
    ) -> PipelineResult<DocumentOutcome> {
        let cleaned = clean_text(&document.text);
        if cleaned.is_empty() || !self.relevance().is_relevant(&cleaned).await? {
            return Ok(DocumentOutcome::Irrelevant);
        }

        let extracted = self.extractor().extract(&document.text).await?;

        // Map candidate phrases to concepts, deduplicating while keeping
        // first-mapping order so pair inference is deterministic.
        let mut mapped: Vec<Iri> = Vec::new();
        for phrase in &extracted.candidate_phrases {
            if let Some(resolved) = self.resolver().resolve(phrase).await? {
                if !mapped.contains(&resolved.concept.iri) {
                    mapped.push(resolved.concept.iri);
                }
            }
        }
        if mapped.is_empty() {
            return Ok(DocumentOutcome::NoConcept);
        }

        let document_node = self.namespace().iri(&document.name);
        for concept in &mapped {
            store.insert(Triple::new(
                concept.clone(),
                self.vocab().is_mentioned_in.clone(),
                document_node.clone(),
            ));
        }

        let mut relationships = 0;
        for i in 0..mapped.len() {
            for j in (i + 1)..mapped.len() {
                let similarity = self.resolver().concept_similarity(&mapped[i], &mapped[j]);
                let predicate = self
                    .classifier()
                    .classify_concept_pair(similarity, &document.text);
                store.insert(Triple::new(
                    mapped[i].clone(),
                    predicate,
                    mapped[j].clone(),
                ));
                relationships += 1;
            }
        }

        Ok(DocumentOutcome::Processed {
            concepts: mapped.len(),
            relationships,
        })
    }
}
