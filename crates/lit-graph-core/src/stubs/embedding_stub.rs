//! Stub embedding provider.
//!
//! Generates deterministic embeddings from a content hash:
//!
//! 1. Hash the text with the std `DefaultHasher`
//! 2. Seed an LCG PRNG with the hash
//! 3. Generate a vector from the seeded PRNG
//! 4. Normalize to unit length
//!
//! Same text always produces the same vector, different text produces a
//! different one, and vectors are normalized so cosine similarity behaves.
//! Tests that need to pin the similarity between two specific texts can
//! register override vectors instead of relying on hash geometry.

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::error::CoreResult;
use crate::traits::EmbeddingProvider;

/// Deterministic hash-based embedding provider for tests.
///
/// # Example
///
/// ```ignore
/// use lit_graph_core::stubs::StubEmbeddingProvider;
/// use lit_graph_core::traits::EmbeddingProvider;
///
/// let provider = StubEmbeddingProvider::new();
/// assert_eq!(provider.dimensions(), 384);
/// ```
pub struct StubEmbeddingProvider {
    dimensions: usize,
    overrides: HashMap<String, Vec<f32>>,
}

impl Default for StubEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StubEmbeddingProvider {
    pub fn new() -> Self {
        Self::with_dimensions(384)
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        StubEmbeddingProvider {
            dimensions,
            overrides: HashMap::new(),
        }
    }

    /// Register a fixed vector for a specific text.
    ///
    /// Lets a test construct controlled geometry, e.g. make a phrase and a
    /// concept definition collinear so resolution must accept them:
    ///
    /// ```ignore
    /// use lit_graph_core::stubs::StubEmbeddingProvider;
    ///
    /// let provider = StubEmbeddingProvider::with_dimensions(3)
    ///     .with_override("posthuman ethics", vec![1.0, 0.0, 0.0])
    ///     .with_override("an ethics beyond the human", vec![1.0, 0.0, 0.0]);
    /// ```
    pub fn with_override(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.overrides.insert(text.into(), vector);
        self
    }

    fn generate(&self, text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut seed = hasher.finish();

        let mut vector = Vec::with_capacity(self.dimensions);
        for _ in 0..self.dimensions {
            // LCG parameters from Knuth's MMIX.
            seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let value = ((seed >> 33) as f32 / (1u64 << 31) as f32) * 2.0 - 1.0;
            vector.push(value);
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbeddingProvider {
    async fn embed(&self, text: &str) -> CoreResult<Vec<f32>> {
        if let Some(vector) = self.overrides.get(text) {
            return Ok(vector.clone());
        }
        Ok(self.generate(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
