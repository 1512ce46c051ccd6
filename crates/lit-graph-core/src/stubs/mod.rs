//! Deterministic stub collaborators for development and testing.
//!
//! These implementations exist so the pipeline can be exercised without the
//! real models: embeddings are derived from a content hash, relevance is
//! keyword-driven, and entity extraction reads from fixed lexicons. They are
//! gated to test builds (or the `test-utils` feature) the same way the
//! production providers are kept out of test builds.

#[cfg(any(test, feature = "test-utils"))]
mod embedding_stub;
#[cfg(any(test, feature = "test-utils"))]
mod extractor_stub;
#[cfg(any(test, feature = "test-utils"))]
mod relevance_stub;

#[cfg(any(test, feature = "test-utils"))]
pub use embedding_stub::StubEmbeddingProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use extractor_stub::StubEntityExtractor;
#[cfg(any(test, feature = "test-utils"))]
pub use relevance_stub::StubRelevanceClassifier;
