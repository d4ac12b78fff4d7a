use std::path::PathBuf;

use thiserror::Error;

/// Startup is all-or-nothing: any of these aborts the process before it
/// serves a single request.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to load configuration: {0}")]
    Config(#[source] anyhow::Error),

    #[error("Vector store directory {0:?} not found; run the `ingest` binary first")]
    VectorStoreMissing(PathBuf),

    #[error("Failed to open vector store: {0}")]
    VectorStore(#[source] anyhow::Error),

    #[error("Language model runtime at {0} is not reachable")]
    LlmUnreachable(String),

    #[error("Failed to initialize LLM provider: {0}")]
    Llm(#[source] anyhow::Error),
}
