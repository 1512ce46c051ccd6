//! Sub-configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Concept resolution thresholds.
///
/// Both thresholds apply uniformly: phrase-to-definition matching and
/// whole-passage resolution share `resolution_threshold`, and the
/// concept-pair relationship inference uses `relatedness_threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Minimum cosine similarity for a concept match to be accepted.
    pub resolution_threshold: f32,
    /// Similarity above which two concepts are considered related outright.
    pub relatedness_threshold: f32,
    /// Split passages on clause boundaries before resolution, so a
    /// two-theme sentence can contribute two mention facts.
    pub split_clauses: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            resolution_threshold: 0.75,
            relatedness_threshold: 0.8,
            split_clauses: true,
        }
    }
}

/// Connection settings for the inference service that hosts the embedding
/// model and the relevance classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the inference service.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Expected embedding dimensionality.
    pub embedding_dimension: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            endpoint: "http://127.0.0.1:8090".to_string(),
            timeout_secs: 30,
            embedding_dimension: 384,
        }
    }
}

/// Name lists for the lexicon-driven entity extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Known character names (surface forms as they appear in the text).
    #[serde(default)]
    pub characters: Vec<String>,
    /// Known animal names.
    #[serde(default)]
    pub animals: Vec<String>,
    /// Known location names.
    #[serde(default)]
    pub locations: Vec<String>,
}

/// Where the concept catalog comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a TOML catalog of concepts with definitions.
    pub path: Option<PathBuf>,
}

/// Settings for the derived analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many top interactions to keep per character.
    pub top_n: usize,
    /// Canonical character name to the name variants that fold into it,
    /// e.g. `Deckard = ["Rick_Deckard", "Rick"]`.
    #[serde(default)]
    pub character_aliases: BTreeMap<String, Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            top_n: 3,
            character_aliases: BTreeMap::new(),
        }
    }
}
