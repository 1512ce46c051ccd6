//! Collaborator traits for the external models the pipeline consumes.
//!
//! The relevance classifier, embedding model, and entity extractor are
//! pre-trained black boxes. Each is an explicit capability object,
//! constructed once at startup and passed into the pipeline; nothing in
//! this workspace reaches for a hidden global model instance.

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::error::CoreResult;

/// Maps text to a fixed-length embedding vector.
///
/// Implementations must be deterministic for a given input within a run;
/// the resolver caches catalog embeddings on that assumption.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a piece of text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Provider`](crate::CoreError::Provider) when the
    /// underlying model or service fails.
    async fn embed(&self, text: &str) -> CoreResult<Vec<f32>>;

    /// Dimensionality of the vectors this provider produces.
    fn dimensions(&self) -> usize;
}

/// Decides whether a passage is in-domain for the analysis.
#[async_trait]
pub trait RelevanceClassifier: Send + Sync {
    async fn is_relevant(&self, text: &str) -> CoreResult<bool>;
}

/// Candidate phrases and typed named entities extracted from a passage.
///
/// Entity labels are raw surface text; classification into graph entity
/// kinds (including the person-to-android reclassification) is pipeline
/// logic, not an extractor responsibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedEntities {
    /// Noun phrases considered for concept mapping, deduplicated.
    pub candidate_phrases: BTreeSet<String>,
    /// Entities the extractor labeled as persons.
    pub people: Vec<String>,
    /// Entities the extractor labeled as animals.
    pub animals: Vec<String>,
    /// Entities the extractor labeled as locations.
    pub locations: Vec<String>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.candidate_phrases.is_empty()
            && self.people.is_empty()
            && self.animals.is_empty()
            && self.locations.is_empty()
    }
}

/// Maps text to candidate noun phrases and typed named entities.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> CoreResult<ExtractedEntities>;
}
