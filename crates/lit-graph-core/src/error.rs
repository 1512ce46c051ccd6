//! Error types for lit-graph-core.
//!
//! Defines the central [`CoreError`] used throughout the core crate and by
//! the collaborator traits, along with the [`CoreResult<T>`] alias.

use thiserror::Error;

/// Top-level error type for core operations and collaborator calls.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A collaborator model (embedding, relevance, extraction) failed.
    ///
    /// Raised by `EmbeddingProvider`, `RelevanceClassifier`, and
    /// `EntityExtractor` implementations when the underlying model or
    /// service cannot produce a result.
    #[error("provider failure in {stage}: {message}")]
    Provider {
        /// Which collaborator failed ("embedding", "relevance", "extraction").
        stage: &'static str,
        /// Underlying failure description.
        message: String,
    },

    /// Embedding vector dimension does not match the configured size.
    #[error("invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected embedding dimension.
        expected: usize,
        /// Actual embedding dimension received.
        actual: usize,
    },

    /// A configuration value failed validation.
    #[error("validation error: {field} - {message}")]
    Validation {
        /// Dotted path of the offending field (e.g. "resolver.resolution_threshold").
        field: String,
        /// Description of the constraint that was violated.
        message: String,
    },

    /// Configuration could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}

/// Result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_names_the_stage() {
        let err = CoreError::Provider {
            stage: "embedding",
            message: "connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("embedding"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn dimension_mismatch_reports_both_sizes() {
        let err = CoreError::DimensionMismatch {
            expected: 384,
            actual: 768,
        };
        assert!(err.to_string().contains("384"));
        assert!(err.to_string().contains("768"));
    }
}
