//! Embedding-based concept resolution.
//!
//! The resolver maps a candidate phrase or passage to the best-matching
//! catalog concept by cosine similarity, gated by an acceptance threshold.
//! Catalog embeddings are computed exactly once at construction and cached
//! read-only for the rest of the run; recomputing them per call would make
//! the pipeline O(passages x catalog size) in embedding calls, the
//! dominant cost.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use lit_graph_core::error::CoreResult;
use lit_graph_core::iri::Iri;
use lit_graph_core::similarity::cosine;
use lit_graph_core::traits::EmbeddingProvider;
use lit_graph_core::types::Concept;

use crate::catalog::ConceptCatalog;

/// A successful resolution: the winning concept and its similarity score.
#[derive(Debug, Clone)]
pub struct ResolvedConcept {
    pub concept: Concept,
    pub score: f32,
}

/// Resolves free text to catalog concepts.
pub struct ConceptResolver {
    catalog: ConceptCatalog,
    embedder: Arc<dyn EmbeddingProvider>,
    /// One aggregated embedding per catalog entry, in catalog order.
    catalog_embeddings: Vec<(Iri, Vec<f32>)>,
    /// Minimum similarity for a match to be accepted. Applied on every
    /// consumer path; there is no ungated variant.
    threshold: f32,
    /// Memoized text embeddings; candidate phrases repeat across documents.
    memo: RwLock<HashMap<String, Arc<Vec<f32>>>>,
}

impl ConceptResolver {
    /// Build a resolver, embedding every catalog entry once.
    ///
    /// An entry with several associated texts gets their mean vector, the
    /// aggregated associated-text embedding of the corpus-derived catalog
    /// variant. An empty catalog is accepted with a warning; every
    /// resolution then returns `None`.
    pub async fn new(
        catalog: ConceptCatalog,
        embedder: Arc<dyn EmbeddingProvider>,
        threshold: f32,
    ) -> CoreResult<Self> {
        if catalog.is_empty() {
            warn!("concept catalog is empty; every resolution will return None");
        }

        let mut catalog_embeddings = Vec::with_capacity(catalog.len());
        for entry in catalog.iter() {
            let mut vectors = Vec::with_capacity(entry.texts.len());
            for t in &entry.texts {
                vectors.push(embedder.embed(t).await?);
            }
            catalog_embeddings.push((entry.concept.iri.clone(), mean_vector(&vectors)));
        }

        Ok(ConceptResolver {
            catalog,
            embedder,
            catalog_embeddings,
            threshold,
            memo: RwLock::new(HashMap::new()),
        })
    }

    pub fn catalog(&self) -> &ConceptCatalog {
        &self.catalog
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Resolve text to the best-matching concept.
    ///
    /// Returns `None` when the catalog is empty or the best similarity
    /// falls below the threshold; the caller must then skip emission
    /// rather than fabricate a placeholder concept.
    pub async fn resolve(&self, text: &str) -> CoreResult<Option<ResolvedConcept>> {
        if self.catalog_embeddings.is_empty() {
            return Ok(None);
        }

        let text_embedding = self.embed_memoized(text).await?;

        let mut best_iri: Option<&Iri> = None;
        let mut best_score = f32::NEG_INFINITY;
        for (iri, embedding) in &self.catalog_embeddings {
            let score = cosine(&text_embedding, embedding);
            if score > best_score {
                best_score = score;
                best_iri = Some(iri);
            }
        }

        let Some(iri) = best_iri else {
            return Ok(None);
        };
        if best_score < self.threshold {
            debug!(
                text,
                score = best_score,
                threshold = self.threshold,
                "no concept above threshold"
            );
            return Ok(None);
        }

        let Some(entry) = self.catalog.get(iri) else {
            return Ok(None);
        };
        let concept = entry.concept.clone();
        debug!(text, concept = %concept.iri.local_name(), score = best_score, "resolved concept");
        Ok(Some(ResolvedConcept {
            concept,
            score: best_score,
        }))
    }

    /// Cosine similarity between two cataloged concepts' embeddings.
    ///
    /// Zero when either concept is not in the catalog.
    pub fn concept_similarity(&self, a: &Iri, b: &Iri) -> f32 {
        let find = |iri: &Iri| {
            self.catalog_embeddings
                .iter()
                .find(|(i, _)| i == iri)
                .map(|(_, e)| e)
        };
        match (find(a), find(b)) {
            (Some(ea), Some(eb)) => cosine(ea, eb),
            _ => 0.0,
        }
    }

    async fn embed_memoized(&self, text: &str) -> CoreResult<Arc<Vec<f32>>> {
        if let Some(cached) = self.memo.read().get(text) {
            return Ok(Arc::clone(cached));
        }
        let embedding = Arc::new(self.embedder.embed(text).await?);
        self.memo
            .write()
            .insert(text.to_string(), Arc::clone(&embedding));
        Ok(embedding)
    }
}

fn mean_vector(vectors: &[Vec<f32>]) -> Vec<f32> {
    let Some(first) = vectors.first() else {
        return Vec::new();
    };
    let mut mean = vec![0.0f32; first.len()];
    let mut counted = 0usize;
    for v in vectors {
        if v.len() != mean.len() {
            continue;
        }
        for (m, x) in mean.iter_mut().zip(v.iter()) {
            *m += x;
        }
        counted += 1;
    }
    if counted > 0 {
        for m in &mut mean {
            *m /= counted as f32;
        }
    }
    mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use lit_graph_core::iri::Namespace;
    use lit_graph_core::stubs::StubEmbeddingProvider;

    fn two_axis_embedder() -> Arc<StubEmbeddingProvider> {
        Arc::new(
            StubEmbeddingProvider::with_dimensions(2)
                .with_override("ethics beyond the human", vec![1.0, 0.0])
                .with_override("moral standing of animals", vec![0.0, 1.0])
                .with_override("posthuman ethics", vec![0.9, 0.1])
                .with_override("a nearby star", vec![0.5, 0.5]),
        )
    }

    fn catalog(ns: &Namespace) -> ConceptCatalog {
        ConceptCatalog::from_definitions(
            ns,
            [
                ("Posthuman Ethics", "ethics beyond the human"),
                ("Animal Ethics", "moral standing of animals"),
            ],
        )
    }

    #[tokio::test]
    async fn resolves_the_closest_concept() {
        let ns = Namespace::default();
        let resolver = ConceptResolver::new(catalog(&ns), two_axis_embedder(), 0.75)
            .await
            .unwrap();

        let resolved = resolver.resolve("posthuman ethics").await.unwrap().unwrap();
        assert_eq!(resolved.concept.iri, ns.iri("Posthuman Ethics"));
        assert!(resolved.score > 0.9);
    }

    #[tokio::test]
    async fn below_threshold_returns_none() {
        let ns = Namespace::default();
        let resolver = ConceptResolver::new(catalog(&ns), two_axis_embedder(), 0.75)
            .await
            .unwrap();

        // Equidistant from both axes: cosine ~0.707, under the gate.
        assert!(resolver.resolve("a nearby star").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_catalog_always_returns_none() {
        let resolver = ConceptResolver::new(
            ConceptCatalog::default(),
            Arc::new(StubEmbeddingProvider::new()),
            0.75,
        )
        .await
        .unwrap();

        assert!(resolver.resolve("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concept_similarity_reads_cached_embeddings() {
        let ns = Namespace::default();
        let resolver = ConceptResolver::new(catalog(&ns), two_axis_embedder(), 0.75)
            .await
            .unwrap();

        let sim = resolver.concept_similarity(&ns.iri("Posthuman Ethics"), &ns.iri("Animal Ethics"));
        assert!(sim.abs() < 1e-6);
        assert_eq!(
            resolver.concept_similarity(&ns.iri("Posthuman Ethics"), &ns.iri("Missing")),
            0.0
        );
    }
}
