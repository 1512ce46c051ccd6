//! Stub entity extractor.

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::error::CoreResult;
use crate::traits::{EntityExtractor, ExtractedEntities};

/// Fixed-lexicon entity extractor for tests.
///
/// Reports a name whenever it appears as a substring of the passage, and
/// offers every whitespace-delimited word pair as a candidate phrase.
#[derive(Debug, Clone, Default)]
pub struct StubEntityExtractor {
    people: Vec<String>,
    animals: Vec<String>,
    locations: Vec<String>,
}

impl StubEntityExtractor {
    pub fn new(people: &[&str], animals: &[&str], locations: &[&str]) -> Self {
        StubEntityExtractor {
            people: people.iter().map(|s| s.to_string()).collect(),
            animals: animals.iter().map(|s| s.to_string()).collect(),
            locations: locations.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn matches(names: &[String], text: &str) -> Vec<String> {
        names
            .iter()
            .filter(|name| text.contains(name.as_str()))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EntityExtractor for StubEntityExtractor {
    async fn extract(&self, text: &str) -> CoreResult<ExtractedEntities> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let candidate_phrases: BTreeSet<String> = words
            .windows(2)
            .map(|pair| pair.join(" "))
            .collect();

        Ok(ExtractedEntities {
            candidate_phrases,
            people: Self::matches(&self.people, text),
            animals: Self::matches(&self.animals, text),
            locations: Self::matches(&self.locations, text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_only_present_names() {
        let extractor = StubEntityExtractor::new(&["Deckard", "Rachael"], &["toad"], &["Mars"]);
        let out = extractor
            .extract("Deckard found a toad in the desert.")
            .await
            .unwrap();
        assert_eq!(out.people, vec!["Deckard"]);
        assert_eq!(out.animals, vec!["toad"]);
        assert!(out.locations.is_empty());
    }

    #[tokio::test]
    async fn candidate_phrases_are_word_pairs() {
        let extractor = StubEntityExtractor::default();
        let out = extractor.extract("electric sheep dream").await.unwrap();
        assert!(out.candidate_phrases.contains("electric sheep"));
        assert!(out.candidate_phrases.contains("sheep dream"));
    }
}
