//! SQLite-backed vector store.
//!
//! Chunk text and metadata live in SQLite, with serialized embeddings for
//! brute-force cosine similarity search. No external server required; the
//! store directory is opaque to everything outside this module.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};

use super::store::{ChunkSearchResult, StoredChunk, VectorStore};
use crate::core::errors::ApiError;

const DB_FILENAME: &str = "index.db";

pub struct SqliteVectorStore {
    pool: SqlitePool,
    #[allow(dead_code)]
    db_path: PathBuf,
}

impl SqliteVectorStore {
    /// Open (or create) the store inside `store_dir`.
    pub async fn open(store_dir: &Path) -> Result<Self, ApiError> {
        std::fs::create_dir_all(store_dir).map_err(ApiError::internal)?;
        Self::with_path(store_dir.join(DB_FILENAME)).await
    }

    /// Open with an explicit database file path (for testing).
    pub async fn with_path(db_path: PathBuf) -> Result<Self, ApiError> {
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(ApiError::internal)?;

        let store = Self { pool, db_path };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), ApiError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS chunks (
                chunk_id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                source TEXT NOT NULL DEFAULT '',
                start_index INTEGER NOT NULL DEFAULT 0,
                embedding BLOB,
                created_at TEXT NOT NULL DEFAULT (STRFTIME('%Y-%m-%dT%H:%M:%fZ', 'now'))
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(ApiError::internal)?;

        Ok(())
    }

    /// Serialize embedding to bytes (little-endian f32).
    fn serialize_embedding(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }

        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
        let denom = norm_a * norm_b;

        if denom <= f32::EPSILON {
            0.0
        } else {
            dot / denom
        }
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    async fn insert(&self, chunk: StoredChunk, embedding: Vec<f32>) -> Result<(), ApiError> {
        let blob = Self::serialize_embedding(&embedding);

        sqlx::query(
            "INSERT OR REPLACE INTO chunks (chunk_id, content, source, start_index, embedding)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&chunk.chunk_id)
        .bind(&chunk.content)
        .bind(&chunk.source)
        .bind(chunk.start_index as i64)
        .bind(&blob)
        .execute(&self.pool)
        .await
        .map_err(ApiError::internal)?;

        Ok(())
    }

    async fn insert_batch(&self, items: Vec<(StoredChunk, Vec<f32>)>) -> Result<(), ApiError> {
        if items.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(ApiError::internal)?;

        for (chunk, embedding) in &items {
            let blob = Self::serialize_embedding(embedding);

            sqlx::query(
                "INSERT OR REPLACE INTO chunks (chunk_id, content, source, start_index, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(&chunk.chunk_id)
            .bind(&chunk.content)
            .bind(&chunk.source)
            .bind(chunk.start_index as i64)
            .bind(&blob)
            .execute(&mut *tx)
            .await
            .map_err(ApiError::internal)?;
        }

        tx.commit().await.map_err(ApiError::internal)?;
        tracing::debug!("Inserted {} chunks into vector store", items.len());
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ChunkSearchResult>, ApiError> {
        let rows = sqlx::query("SELECT chunk_id, content, source, start_index, embedding FROM chunks")
            .fetch_all(&self.pool)
            .await
            .map_err(ApiError::internal)?;

        let mut scored: Vec<ChunkSearchResult> = rows
            .iter()
            .filter_map(|row| {
                let embedding_bytes: Vec<u8> = row.get("embedding");
                if embedding_bytes.is_empty() {
                    return None;
                }
                let stored_emb = Self::deserialize_embedding(&embedding_bytes);
                let score = Self::cosine_similarity(query_embedding, &stored_emb);

                let start_index: i64 = row.get("start_index");

                Some(ChunkSearchResult {
                    chunk: StoredChunk {
                        chunk_id: row.get("chunk_id"),
                        content: row.get("content"),
                        source: row.get("source"),
                        start_index: start_index.max(0) as usize,
                    },
                    score,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);

        Ok(scored)
    }

    async fn count(&self) -> Result<usize, ApiError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chunks")
            .fetch_one(&self.pool)
            .await
            .map_err(ApiError::internal)?;

        Ok(count as usize)
    }

    async fn clear(&self) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM chunks")
            .execute(&self.pool)
            .await
            .map_err(ApiError::internal)?;

        tracing::info!("Cleared all chunks from vector store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> SqliteVectorStore {
        let tmp = std::env::temp_dir().join(format!("lexa-store-test-{}.db", uuid::Uuid::new_v4()));
        SqliteVectorStore::with_path(tmp).await.unwrap()
    }

    fn chunk(id: &str, content: &str) -> StoredChunk {
        StoredChunk {
            chunk_id: id.to_string(),
            content: content.to_string(),
            source: "law.pdf".to_string(),
            start_index: 0,
        }
    }

    #[tokio::test]
    async fn insert_and_search() {
        let store = test_store().await;

        store
            .insert(chunk("c1", "All citizens are equal."), vec![1.0, 0.0, 0.0])
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 1);

        let results = store.search(&[1.0, 0.0, 0.0], 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.chunk_id, "c1");
        assert_eq!(results[0].chunk.source, "law.pdf");
        assert!(results[0].score > 0.99);
    }

    #[tokio::test]
    async fn search_ranks_by_similarity() {
        let store = test_store().await;

        store
            .insert_batch(vec![
                (chunk("far", "unrelated"), vec![0.0, 1.0, 0.0]),
                (chunk("near", "relevant"), vec![0.9, 0.1, 0.0]),
                (chunk("mid", "somewhat"), vec![0.5, 0.5, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.chunk_id, "near");
        assert_eq!(results[1].chunk.chunk_id, "mid");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn start_index_round_trips() {
        let store = test_store().await;

        let mut c = chunk("c1", "Section 2 talks about property rights.");
        c.start_index = 1234;
        store.insert(c, vec![0.2, 0.8]).await.unwrap();

        let results = store.search(&[0.2, 0.8], 1).await.unwrap();
        assert_eq!(results[0].chunk.start_index, 1234);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = test_store().await;

        store.insert(chunk("c1", "data"), vec![1.0]).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_content_with_distinct_ids_duplicates_records() {
        let store = test_store().await;

        store.insert(chunk("a", "same text"), vec![1.0, 0.0]).await.unwrap();
        store.insert(chunk("b", "same text"), vec![1.0, 0.0]).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }
}
