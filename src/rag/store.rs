use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

/// A persisted chunk: text plus its source-tracking metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChunk {
    /// Unique chunk identifier.
    pub chunk_id: String,
    /// The text content of the chunk.
    pub content: String,
    /// Originating filename.
    pub source: String,
    /// Character offset of the chunk within its source's cleaned text.
    pub start_index: usize,
}

/// Result of a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSearchResult {
    pub chunk: StoredChunk,
    /// Similarity score (higher = better).
    pub score: f32,
}

/// Abstract interface for the persisted vector store.
///
/// No de-duplication is performed anywhere behind this trait: re-inserting
/// the same content duplicates records.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert a chunk with its embedding vector.
    async fn insert(&self, chunk: StoredChunk, embedding: Vec<f32>) -> Result<(), ApiError>;

    /// Insert multiple chunks in one transaction.
    async fn insert_batch(&self, items: Vec<(StoredChunk, Vec<f32>)>) -> Result<(), ApiError>;

    /// Top-`limit` chunks by similarity to the query embedding.
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ChunkSearchResult>, ApiError>;

    /// Total stored chunk count.
    async fn count(&self) -> Result<usize, ApiError>;

    /// Remove every stored chunk (full rebuild).
    async fn clear(&self) -> Result<(), ApiError>;
}
