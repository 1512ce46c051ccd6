//! The per-passage graph building driver.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use lit_graph_core::config::Config;
use lit_graph_core::iri::Namespace;
use lit_graph_core::traits::{EmbeddingProvider, EntityExtractor, RelevanceClassifier};
use lit_graph_core::types::{Passage, Triple, Vocab};
use lit_graph_store::{add_mention_record, TripleStore};

use crate::catalog::ConceptCatalog;
use crate::error::PipelineResult;
use crate::extract::classify_entities;
use crate::relation::RelationshipClassifier;
use crate::resolver::ConceptResolver;
use crate::text::{clean_text, split_clauses};

/// The collaborator models the pipeline consumes, constructed once at
/// startup and passed in explicitly.
pub struct Providers {
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub relevance: Arc<dyn RelevanceClassifier>,
    pub extractor: Arc<dyn EntityExtractor>,
}

/// What happened to one passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassageOutcome {
    /// The relevance classifier gated it out.
    Irrelevant,
    /// Relevant, but no clause resolved to a concept above threshold.
    NoConcept,
    /// Relevant and at least one concept-linked fact was emitted.
    Processed {
        /// Mention triples emitted.
        mentions: usize,
        /// Entity relationship facts emitted.
        relations: usize,
    },
}

/// Summary of one pipeline run, serializable for run manifests.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub passages_total: usize,
    pub passages_relevant: usize,
    pub passages_without_concept: usize,
    pub passages_failed: usize,
    /// Triple insertions during the run, counting repeats.
    pub triples_added: u64,
    /// Distinct triples in the store after the run.
    pub distinct_triples: usize,
}

/// The extraction pipeline.
///
/// Owns its collaborators and classifiers; the triple store is an explicit
/// parameter of every operation, never ambient state.
pub struct GraphPipeline {
    relevance: Arc<dyn RelevanceClassifier>,
    extractor: Arc<dyn EntityExtractor>,
    resolver: ConceptResolver,
    classifier: RelationshipClassifier,
    ns: Namespace,
    vocab: Vocab,
    split_into_clauses: bool,
    mention_records: bool,
}

impl GraphPipeline {
    /// Build a pipeline from providers, a catalog, and configuration.
    ///
    /// Embeds the whole catalog once; this is the only place catalog
    /// embeddings are computed.
    pub async fn new(
        providers: Providers,
        catalog: ConceptCatalog,
        config: &Config,
    ) -> PipelineResult<Self> {
        let ns = config.namespace();
        let vocab = Vocab::new(&ns);
        let resolver = ConceptResolver::new(
            catalog,
            providers.embedder,
            config.resolver.resolution_threshold,
        )
        .await?;

        Ok(GraphPipeline {
            relevance: providers.relevance,
            extractor: providers.extractor,
            resolver,
            classifier: RelationshipClassifier::new(
                vocab.clone(),
                config.resolver.relatedness_threshold,
            ),
            ns,
            vocab,
            split_into_clauses: config.resolver.split_clauses,
            mention_records: false,
        })
    }

    /// Record entity observations as typed mention nodes instead of bare
    /// triples.
    pub fn with_mention_records(mut self, enabled: bool) -> Self {
        self.mention_records = enabled;
        self
    }

    pub fn resolver(&self) -> &ConceptResolver {
        &self.resolver
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    pub fn namespace(&self) -> &Namespace {
        &self.ns
    }

    pub(crate) fn relevance(&self) -> &dyn RelevanceClassifier {
        self.relevance.as_ref()
    }

    pub(crate) fn extractor(&self) -> &dyn EntityExtractor {
        self.extractor.as_ref()
    }

    pub(crate) fn classifier(&self) -> &RelationshipClassifier {
        &self.classifier
    }

    /// Process a corpus of passages, appending triples to `store`.
    ///
    /// A collaborator failure on one passage is logged and counted, and
    /// the run continues with the next passage; a long batch survives a
    /// handful of malformed inputs.
    pub async fn run<I>(&self, store: &mut TripleStore, lines: I) -> RunSummary
    where
        I: IntoIterator<Item = String>,
    {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let insertions_before = store.total_insertions();

        let mut passages_total = 0;
        let mut passages_relevant = 0;
        let mut passages_without_concept = 0;
        let mut passages_failed = 0;

        for (index, line) in lines.into_iter().enumerate() {
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            passages_total += 1;
            let passage = Passage::new(index, text);

            match self.ingest_passage(store, &passage).await {
                Ok(PassageOutcome::Irrelevant) => {}
                Ok(PassageOutcome::NoConcept) => {
                    passages_relevant += 1;
                    passages_without_concept += 1;
                }
                Ok(PassageOutcome::Processed { mentions, relations }) => {
                    passages_relevant += 1;
                    debug!(passage = index, mentions, relations, "passage processed");
                }
                Err(err) => {
                    warn!(passage = index, error = %err, "skipping failed passage");
                    passages_failed += 1;
                }
            }
        }

        let summary = RunSummary {
            run_id,
            started_at,
            finished_at: Utc::now(),
            passages_total,
            passages_relevant,
            passages_without_concept,
            passages_failed,
            triples_added: store.total_insertions() - insertions_before,
            distinct_triples: store.len(),
        };
        info!(
            %run_id,
            passages = summary.passages_total,
            relevant = summary.passages_relevant,
            failed = summary.passages_failed,
            triples = summary.distinct_triples,
            "pipeline run finished"
        );
        summary
    }

    /// Process a single passage.
    ///
    /// Relevance gate, then per clause: concept resolution, a mention
    /// fact, entity extraction, and one relationship fact per entity.
    pub async fn ingest_passage(
        &self,
        store: &mut TripleStore,
        passage: &Passage,
    ) -> PipelineResult<PassageOutcome> {
        let cleaned = clean_text(&passage.text);
        if cleaned.is_empty() || !self.relevance.is_relevant(&cleaned).await? {
            return Ok(PassageOutcome::Irrelevant);
        }

        let clauses = if self.split_into_clauses {
            split_clauses(&passage.text)
        } else {
            vec![passage.text.clone()]
        };

        let passage_node = passage.node(&self.ns);
        let mut mentions = 0;
        let mut relations = 0;

        // Facts are buffered and only merged in once the whole passage has
        // processed, so a collaborator failure mid-passage leaves no
        // partial facts behind.
        let mut scratch = TripleStore::new();

        for clause in &clauses {
            let Some(resolved) = self.resolver.resolve(&clean_text(clause)).await? else {
                continue;
            };
            let concept_iri = resolved.concept.iri;

            scratch.insert(Triple::new(
                concept_iri.clone(),
                self.vocab.is_mentioned_in.clone(),
                passage_node.clone(),
            ));
            mentions += 1;

            // Entities come from the clause; the android reclassification
            // reads the whole passage.
            let extracted = self.extractor.extract(clause).await?;
            for entity in classify_entities(&self.ns, &extracted, &passage.text) {
                let predicate = self.classifier.predicate_for(entity.kind, clause);
                if self.mention_records {
                    let label = format!("mention_{}_{}", passage.index, relations);
                    add_mention_record(
                        &mut scratch,
                        &self.vocab,
                        label,
                        &entity.iri,
                        &predicate,
                        &concept_iri,
                    );
                } else {
                    scratch.insert(Triple::new(entity.iri, predicate, concept_iri.clone()));
                }
                relations += 1;
            }
        }

        if mentions == 0 {
            return Ok(PassageOutcome::NoConcept);
        }
        store.merge(scratch);
        Ok(PassageOutcome::Processed { mentions, relations })
    }
}
