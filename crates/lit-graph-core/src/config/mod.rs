//! Configuration management for the lit-graph system.
//!
//! Configuration is loaded in layers, each overriding the previous:
//!
//! 1. `config/default.toml`
//! 2. `config/{LIT_GRAPH_ENV}.toml`
//! 3. Environment variables with the `LIT_GRAPH_` prefix
//!
//! Every load is validated before use; thresholds outside `[0, 1]` or a
//! zero embedding dimension are configuration errors, not runtime
//! surprises.

mod sub_configs;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::iri::{Namespace, DEFAULT_NAMESPACE};

pub use sub_configs::{
    AnalysisConfig, CatalogConfig, ExtractorConfig, InferenceConfig, ResolverConfig,
};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Namespace prefix under which all graph identifiers are minted.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: default_namespace(),
            resolver: ResolverConfig::default(),
            inference: InferenceConfig::default(),
            extractor: ExtractorConfig::default(),
            catalog: CatalogConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from files and environment.
    pub fn load() -> CoreResult<Self> {
        let env = std::env::var("LIT_GRAPH_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(config::Environment::with_prefix("LIT_GRAPH").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(env, namespace = %config.namespace, "configuration loaded");
        Ok(config)
    }

    /// Load from an explicit TOML file, with environment overrides.
    pub fn load_from(path: &str) -> CoreResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("LIT_GRAPH").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// The namespace as a typed value.
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.namespace.clone())
    }

    /// Validate all fields; returns the first violation found.
    pub fn validate(&self) -> CoreResult<()> {
        if self.namespace.is_empty() {
            return Err(CoreError::Validation {
                field: "namespace".to_string(),
                message: "namespace must not be empty".to_string(),
            });
        }
        validate_threshold(
            "resolver.resolution_threshold",
            self.resolver.resolution_threshold,
        )?;
        validate_threshold(
            "resolver.relatedness_threshold",
            self.resolver.relatedness_threshold,
        )?;
        if self.inference.embedding_dimension == 0 {
            return Err(CoreError::Validation {
                field: "inference.embedding_dimension".to_string(),
                message: "embedding dimension must be positive".to_string(),
            });
        }
        if self.analysis.top_n == 0 {
            return Err(CoreError::Validation {
                field: "analysis.top_n".to_string(),
                message: "top_n must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_threshold(field: &str, value: f32) -> CoreResult<()> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(CoreError::Validation {
            field: field.to_string(),
            message: format!("threshold must be within [0, 1], got {value}"),
        });
    }
    Ok(())
}
