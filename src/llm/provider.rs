use async_trait::async_trait;

use super::types::GenerateRequest;
use crate::core::errors::ApiError;

/// Seam between the pipeline and the model runtime.
///
/// One provider serves both text generation and embeddings; the caller picks
/// the model per call. The embedding model must be identical at ingestion and
/// query time or similarity scores are meaningless.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g. "ollama").
    fn name(&self) -> &str;

    /// Check whether the runtime is reachable.
    async fn health_check(&self) -> Result<bool, ApiError>;

    /// Non-streaming completion.
    async fn generate(&self, request: GenerateRequest, model_id: &str)
        -> Result<String, ApiError>;

    /// Embed each input into a fixed-length vector.
    async fn embed(&self, inputs: &[String], model_id: &str) -> Result<Vec<Vec<f32>>, ApiError>;
}
