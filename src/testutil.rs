//! Test doubles shared across unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::errors::ApiError;
use crate::llm::{GenerateRequest, LlmProvider};

/// Deterministic provider: byte-frequency embeddings and canned replies.
///
/// `generate` answers with `classify_reply` for classification prompts and
/// `answer_reply` for everything else, and counts invocations so tests can
/// assert that rejected requests never reach the model.
pub struct MockLlm {
    pub classify_reply: String,
    pub answer_reply: String,
    pub generate_calls: AtomicUsize,
}

impl MockLlm {
    pub fn new(classify_reply: &str, answer_reply: &str) -> Self {
        Self {
            classify_reply: classify_reply.to_string(),
            answer_reply: answer_reply.to_string(),
            generate_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> Result<bool, ApiError> {
        Ok(true)
    }

    async fn generate(
        &self,
        request: GenerateRequest,
        _model_id: &str,
    ) -> Result<String, ApiError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        if request.prompt.contains("legal document template") {
            Ok(self.classify_reply.clone())
        } else {
            Ok(self.answer_reply.clone())
        }
    }

    async fn embed(&self, inputs: &[String], _model_id: &str) -> Result<Vec<Vec<f32>>, ApiError> {
        Ok(inputs.iter().map(|s| byte_frequency(s)).collect())
    }
}

/// Identical inputs embed identically; different texts usually differ.
pub fn byte_frequency(text: &str) -> Vec<f32> {
    let mut vec = vec![0.0f32; 32];
    for byte in text.bytes() {
        vec[(byte % 32) as usize] += 1.0;
    }
    vec
}
