//! Stub relevance classifier.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::traits::RelevanceClassifier;

/// Keyword-driven relevance classifier for tests.
///
/// With no keywords configured, every passage is relevant. With keywords,
/// a passage is relevant only when it contains at least one of them
/// (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct StubRelevanceClassifier {
    keywords: Vec<String>,
}

impl StubRelevanceClassifier {
    /// Accept every passage.
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Accept only passages containing one of the given keywords.
    pub fn with_keywords(keywords: &[&str]) -> Self {
        StubRelevanceClassifier {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

#[async_trait]
impl RelevanceClassifier for StubRelevanceClassifier {
    async fn is_relevant(&self, text: &str) -> CoreResult<bool> {
        if self.keywords.is_empty() {
            return Ok(true);
        }
        let lower = text.to_lowercase();
        Ok(self.keywords.iter().any(|k| lower.contains(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accept_all_accepts() {
        let classifier = StubRelevanceClassifier::accept_all();
        assert!(classifier.is_relevant("anything at all").await.unwrap());
    }

    #[tokio::test]
    async fn keywords_gate_relevance() {
        let classifier = StubRelevanceClassifier::with_keywords(&["android"]);
        assert!(classifier.is_relevant("The Android wept.").await.unwrap());
        assert!(!classifier.is_relevant("A quiet morning.").await.unwrap());
    }
}
