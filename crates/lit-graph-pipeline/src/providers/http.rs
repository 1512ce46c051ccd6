//! HTTP client for the inference service.
//!
//! The service hosts the pre-trained models this pipeline consumes as
//! black boxes: a sentence embedding model behind `POST /embed` and the
//! domain relevance classifier behind `POST /classify`. Both endpoints
//! take `{"text": ...}` and answer JSON.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use lit_graph_core::config::InferenceConfig;
use lit_graph_core::error::{CoreError, CoreResult};
use lit_graph_core::traits::{EmbeddingProvider, RelevanceClassifier};

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    relevant: bool,
}

/// Client for the embedding and relevance endpoints.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    base: String,
    dimensions: usize,
}

impl InferenceClient {
    pub fn new(config: &InferenceConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::Provider {
                stage: "inference",
                message: e.to_string(),
            })?;
        Ok(InferenceClient {
            http,
            base: config.endpoint.trim_end_matches('/').to_string(),
            dimensions: config.embedding_dimension,
        })
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        stage: &'static str,
        route: &str,
        text: &str,
    ) -> CoreResult<T> {
        let url = format!("{}/{route}", self.base);
        let response = self
            .http
            .post(&url)
            .json(&TextRequest { text })
            .send()
            .await
            .map_err(|e| CoreError::Provider {
                stage,
                message: e.to_string(),
            })?;
        let response = response.error_for_status().map_err(|e| CoreError::Provider {
            stage,
            message: e.to_string(),
        })?;
        response.json::<T>().await.map_err(|e| CoreError::Provider {
            stage,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for InferenceClient {
    async fn embed(&self, text: &str) -> CoreResult<Vec<f32>> {
        let response: EmbedResponse = self.post("embedding", "embed", text).await?;
        if response.embedding.len() != self.dimensions {
            return Err(CoreError::DimensionMismatch {
                expected: self.dimensions,
                actual: response.embedding.len(),
            });
        }
        Ok(response.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[async_trait]
impl RelevanceClassifier for InferenceClient {
    async fn is_relevant(&self, text: &str) -> CoreResult<bool> {
        let response: ClassifyResponse = self.post("relevance", "classify", text).await?;
        Ok(response.relevant)
    }
}
