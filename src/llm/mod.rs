//! Language-model access: provider trait, per-call request types, and the
//! Ollama HTTP implementation.

pub mod ollama;
pub mod provider;
pub mod types;

pub use ollama::OllamaProvider;
pub use provider::LlmProvider;
pub use types::GenerateRequest;
