//! Lexicon-driven entity extraction.
//!
//! For a novel with a fixed cast, configured name lists recognize the
//! entities worth graphing. Candidate phrases for concept mapping are
//! harvested as capitalized word runs plus adjacent-word pairs, a rough
//! stand-in for noun chunks.

use async_trait::async_trait;
use std::collections::BTreeSet;

use lit_graph_core::config::ExtractorConfig;
use lit_graph_core::error::CoreResult;
use lit_graph_core::traits::{EntityExtractor, ExtractedEntities};

/// Entity extractor backed by configured name lexicons.
#[derive(Debug, Clone, Default)]
pub struct LexiconEntityExtractor {
    characters: Vec<String>,
    animals: Vec<String>,
    locations: Vec<String>,
}

impl LexiconEntityExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        LexiconEntityExtractor {
            characters: config.characters.clone(),
            animals: config.animals.clone(),
            locations: config.locations.clone(),
        }
    }

    /// Names found in the text. Multi-word names match as substrings;
    /// single words must match a whole token so "Rick" does not fire
    /// inside "tricky".
    fn find_names(names: &[String], text: &str, tokens: &[&str]) -> Vec<String> {
        names
            .iter()
            .filter(|name| {
                if name.contains(' ') {
                    text.contains(name.as_str())
                } else {
                    tokens.iter().any(|t| t == name)
                }
            })
            .cloned()
            .collect()
    }
}

/// Strip leading and trailing punctuation from a raw token.
fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_uppercase())
}

#[async_trait]
impl EntityExtractor for LexiconEntityExtractor {
    async fn extract(&self, text: &str) -> CoreResult<ExtractedEntities> {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(trim_token)
            .filter(|t| !t.is_empty())
            .collect();

        let mut candidate_phrases = BTreeSet::new();
        // Capitalized runs ("Cyborg Theory", "San Francisco").
        let mut run: Vec<&str> = Vec::new();
        for token in tokens.iter().chain(std::iter::once(&"")) {
            if is_capitalized(token) {
                run.push(token);
            } else {
                if !run.is_empty() {
                    candidate_phrases.insert(run.join(" "));
                }
                run.clear();
            }
        }
        // Adjacent-word pairs, lowercased ("posthuman ethics").
        for pair in tokens.windows(2) {
            candidate_phrases.insert(format!("{} {}", pair[0], pair[1]).to_lowercase());
        }

        Ok(ExtractedEntities {
            candidate_phrases,
            people: Self::find_names(&self.characters, text, &tokens),
            animals: Self::find_names(&self.animals, text, &tokens),
            locations: Self::find_names(&self.locations, text, &tokens),
        })
    }
}
