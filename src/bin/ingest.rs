//! Offline ingestion pipeline: PDF directory -> cleaned documents ->
//! overlapping chunks -> embeddings -> persisted vector store.
//!
//! Re-running without clearing the store duplicates records; there is no
//! de-duplication at any layer.

use std::sync::Arc;

use anyhow::{bail, Context};

use lexa_backend::core::config::{AppConfig, AppPaths};
use lexa_backend::core::logging;
use lexa_backend::ingest::{load_documents, ChunkSplitter};
use lexa_backend::llm::{LlmProvider, OllamaProvider};
use lexa_backend::rag::{SqliteVectorStore, StoredChunk, VectorStore};

const EMBED_BATCH: usize = 32;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = Arc::new(AppPaths::new());
    logging::init(&paths);

    let config = AppConfig::load(&paths).context("Failed to load configuration")?;

    let llm = OllamaProvider::new(config.ollama.base_url.clone());
    if !llm.health_check().await.unwrap_or(false) {
        bail!(
            "Embedding model runtime at {} is not reachable; cannot build the vector store",
            config.ollama.base_url
        );
    }

    tracing::info!("Loading legal documents from {:?}", paths.pdf_dir);
    let documents = load_documents(&paths.pdf_dir)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Document ingestion failed")?;
    if documents.is_empty() {
        bail!(
            "No legal documents found or extracted in {:?}; nothing to ingest",
            paths.pdf_dir
        );
    }
    tracing::info!("Extracted text from {} documents", documents.len());

    let splitter = ChunkSplitter::new(config.rag.chunk_size, config.rag.chunk_overlap);
    let chunks = splitter.split_documents(&documents);
    tracing::info!("Created {} text chunks", chunks.len());

    let store = SqliteVectorStore::open(&paths.store_dir)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to open vector store")?;

    let mut stored = 0usize;
    for batch in chunks.chunks(EMBED_BATCH) {
        let inputs: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
        let embeddings = llm
            .embed(&inputs, &config.ollama.embedding_model)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
            .context("Embedding failed")?;

        let items: Vec<(StoredChunk, Vec<f32>)> = batch
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| {
                (
                    StoredChunk {
                        chunk_id: uuid::Uuid::new_v4().to_string(),
                        content: chunk.content.clone(),
                        source: chunk.source_name.clone(),
                        start_index: chunk.start_index,
                    },
                    embedding,
                )
            })
            .collect();

        store
            .insert_batch(items)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
            .context("Failed to persist chunks")?;
        stored += batch.len();
        tracing::info!("Persisted {}/{} chunks", stored, chunks.len());
    }

    let total = store
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    tracing::info!(
        "Vector store at {:?} updated: {} chunks total",
        paths.store_dir,
        total
    );

    Ok(())
}
