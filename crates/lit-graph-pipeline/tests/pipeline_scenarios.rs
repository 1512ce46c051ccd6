//! End-to-end pipeline scenarios with stub collaborators.

use async_trait::async_trait;
use std::sync::Arc;

use lit_graph_core::error::{CoreError, CoreResult};
use lit_graph_core::iri::Namespace;
use lit_graph_core::stubs::{
    StubEmbeddingProvider, StubEntityExtractor, StubRelevanceClassifier,
};
use lit_graph_core::traits::{EntityExtractor, ExtractedEntities};
use lit_graph_core::types::{Triple, Vocab};
use lit_graph_core::Config;
use lit_graph_pipeline::{ConceptCatalog, CriticismDocument, GraphPipeline, Providers};
use lit_graph_store::TripleStore;

fn ns() -> Namespace {
    Namespace::default()
}

fn vocab() -> Vocab {
    Vocab::default()
}

/// Catalog with two orthogonal concepts and pinned clause embeddings, so
/// resolution is fully controlled.
fn two_concept_embedder() -> Arc<StubEmbeddingProvider> {
    Arc::new(
        StubEmbeddingProvider::with_dimensions(2)
            .with_override("an ethics beyond the human", vec![1.0, 0.0])
            .with_override("the moral standing of animals", vec![0.0, 1.0])
            .with_override("Deckard exemplifies posthuman ethics", vec![1.0, 0.0])
            .with_override("Isidore questions animal ethics", vec![0.0, 1.0])
            .with_override("Rachael the android resists posthuman ethics", vec![1.0, 0.0])
            .with_override("a line about nothing in particular", vec![0.6, 0.6]),
    )
}

fn two_concept_catalog() -> ConceptCatalog {
    ConceptCatalog::from_definitions(
        &ns(),
        [
            ("Posthuman Ethics", "an ethics beyond the human"),
            ("Animal Ethics", "the moral standing of animals"),
        ],
    )
}

fn providers(extractor: Arc<dyn EntityExtractor>) -> Providers {
    Providers {
        embedder: two_concept_embedder(),
        relevance: Arc::new(StubRelevanceClassifier::accept_all()),
        extractor,
    }
}

fn cast_extractor() -> Arc<StubEntityExtractor> {
    Arc::new(StubEntityExtractor::new(
        &["Deckard", "Isidore", "Rachael"],
        &[],
        &[],
    ))
}

#[tokio::test]
async fn two_theme_sentence_yields_two_mentions_and_two_relationships() {
    let pipeline = GraphPipeline::new(
        providers(cast_extractor()),
        two_concept_catalog(),
        &Config::default(),
    )
    .await
    .unwrap();

    let mut store = TripleStore::new();
    let summary = pipeline
        .run(
            &mut store,
            ["Deckard exemplifies posthuman ethics while Isidore questions animal ethics"
                .to_string()],
        )
        .await;

    assert_eq!(summary.passages_total, 1);
    assert_eq!(summary.passages_relevant, 1);
    assert_eq!(summary.passages_failed, 0);

    let ns = ns();
    let vocab = vocab();
    let passage = ns.iri("passage_0");
    for expected in [
        Triple::new(
            ns.iri("Posthuman Ethics"),
            vocab.is_mentioned_in.clone(),
            passage.clone(),
        ),
        Triple::new(
            ns.iri("Animal Ethics"),
            vocab.is_mentioned_in.clone(),
            passage.clone(),
        ),
        Triple::new(
            ns.iri("Deckard"),
            vocab.exemplifies.clone(),
            ns.iri("Posthuman Ethics"),
        ),
        Triple::new(
            ns.iri("Isidore"),
            vocab.questions.clone(),
            ns.iri("Animal Ethics"),
        ),
    ] {
        assert!(store.contains(&expected), "missing {expected}");
    }
    assert_eq!(store.len(), 4);
}

#[tokio::test]
async fn android_passage_forces_struggles_with() {
    let pipeline = GraphPipeline::new(
        providers(cast_extractor()),
        two_concept_catalog(),
        &Config::default(),
    )
    .await
    .unwrap();

    let mut store = TripleStore::new();
    // "resists" is a strugglesWith cue, but the override is what should
    // fire: the passage mentions an android, so Rachael is reclassified
    // and always linked via strugglesWith.
    pipeline
        .run(
            &mut store,
            ["Rachael the android resists posthuman ethics".to_string()],
        )
        .await;

    let expected = Triple::new(
        ns().iri("Rachael"),
        vocab().struggles_with.clone(),
        ns().iri("Posthuman Ethics"),
    );
    assert!(store.contains(&expected));
}

#[tokio::test]
async fn below_threshold_passage_contributes_nothing() {
    let pipeline = GraphPipeline::new(
        providers(cast_extractor()),
        two_concept_catalog(),
        &Config::default(),
    )
    .await
    .unwrap();

    let mut store = TripleStore::new();
    let summary = pipeline
        .run(
            &mut store,
            ["a line about nothing in particular".to_string()],
        )
        .await;

    assert!(store.is_empty());
    assert_eq!(summary.passages_without_concept, 1);
}

#[tokio::test]
async fn empty_catalog_degrades_to_no_concept_facts() {
    let pipeline = GraphPipeline::new(
        providers(cast_extractor()),
        ConceptCatalog::default(),
        &Config::default(),
    )
    .await
    .unwrap();

    let mut store = TripleStore::new();
    let summary = pipeline
        .run(
            &mut store,
            [
                "Deckard exemplifies posthuman ethics while Isidore questions animal ethics"
                    .to_string(),
                "Rachael the android resists posthuman ethics".to_string(),
            ],
        )
        .await;

    assert!(store.is_empty());
    assert_eq!(summary.passages_without_concept, 2);
}

/// Extractor that fails on marked passages.
struct ExplodingExtractor {
    inner: StubEntityExtractor,
}

#[async_trait]
impl EntityExtractor for ExplodingExtractor {
    async fn extract(&self, text: &str) -> CoreResult<ExtractedEntities> {
        if text.contains("poisoned") {
            return Err(CoreError::Provider {
                stage: "extraction",
                message: "model crashed".to_string(),
            });
        }
        self.inner.extract(text).await
    }
}

#[tokio::test]
async fn collaborator_failure_skips_the_passage_and_continues() {
    let embedder = Arc::new(
        StubEmbeddingProvider::with_dimensions(2)
            .with_override("an ethics beyond the human", vec![1.0, 0.0])
            .with_override("the moral standing of animals", vec![0.0, 1.0])
            .with_override("Deckard exemplifies posthuman ethics", vec![1.0, 0.0])
            .with_override("a poisoned passage about posthuman ethics", vec![1.0, 0.0]),
    );
    let pipeline = GraphPipeline::new(
        Providers {
            embedder,
            relevance: Arc::new(StubRelevanceClassifier::accept_all()),
            extractor: Arc::new(ExplodingExtractor {
                inner: StubEntityExtractor::new(&["Deckard"], &[], &[]),
            }),
        },
        two_concept_catalog(),
        &Config::default(),
    )
    .await
    .unwrap();

    let mut store = TripleStore::new();
    let summary = pipeline
        .run(
            &mut store,
            [
                "a poisoned passage about posthuman ethics".to_string(),
                "Deckard exemplifies posthuman ethics".to_string(),
            ],
        )
        .await;

    assert_eq!(summary.passages_failed, 1);
    assert_eq!(summary.passages_relevant, 1);
    let expected = Triple::new(
        ns().iri("Deckard"),
        vocab().exemplifies.clone(),
        ns().iri("Posthuman Ethics"),
    );
    assert!(store.contains(&expected));
}

#[tokio::test]
async fn mention_records_strategy_stores_typed_nodes() {
    let pipeline = GraphPipeline::new(
        providers(cast_extractor()),
        two_concept_catalog(),
        &Config::default(),
    )
    .await
    .unwrap()
    .with_mention_records(true);

    let mut store = TripleStore::new();
    pipeline
        .run(
            &mut store,
            ["Deckard exemplifies posthuman ethics".to_string()],
        )
        .await;

    let vocab = vocab();
    // One mention fact plus a four-arc mention record.
    let typed = store
        .with_predicate(&vocab.rdf_type)
        .filter(|t| t.object == lit_graph_core::types::Term::Iri(vocab.mention_class.clone()))
        .count();
    assert_eq!(typed, 1);
    let bare = Triple::new(
        ns().iri("Deckard"),
        vocab.exemplifies.clone(),
        ns().iri("Posthuman Ethics"),
    );
    assert!(!store.contains(&bare));
}

#[tokio::test]
async fn criticism_documents_produce_concept_relationships() {
    let embedder = Arc::new(
        StubEmbeddingProvider::with_dimensions(2)
            .with_override("an ethics beyond the human", vec![1.0, 0.0])
            .with_override("the moral standing of animals", vec![0.0, 1.0])
            .with_override("posthuman ethics", vec![1.0, 0.0])
            .with_override("animal ethics", vec![0.0, 1.0]),
    );
    let pipeline = GraphPipeline::new(
        Providers {
            embedder,
            relevance: Arc::new(StubRelevanceClassifier::accept_all()),
            // The stub offers lowercased word pairs as candidate phrases.
            extractor: Arc::new(StubEntityExtractor::default()),
        },
        two_concept_catalog(),
        &Config::default(),
    )
    .await
    .unwrap();

    let mut store = TripleStore::new();
    let summary = pipeline
        .run_criticism(
            &mut store,
            [CriticismDocument::new(
                "c-essay-1",
                "this essay challenges posthuman ethics through animal ethics",
            )],
        )
        .await;

    assert_eq!(summary.passages_relevant, 1);

    let ns = ns();
    let vocab = vocab();
    let doc = ns.iri("c-essay-1");
    assert!(store.contains(&Triple::new(
        ns.iri("Posthuman Ethics"),
        vocab.is_mentioned_in.clone(),
        doc.clone(),
    )));
    assert!(store.contains(&Triple::new(
        ns.iri("Animal Ethics"),
        vocab.is_mentioned_in.clone(),
        doc,
    )));

    // Orthogonal concepts, "challenges" in the text: criticizes.
    let pair: Vec<_> = store.with_predicate(&vocab.criticizes).collect();
    assert_eq!(pair.len(), 1);
}
