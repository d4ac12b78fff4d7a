use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::prompts::answer_prompt;
use super::store::VectorStore;
use crate::core::config::{OllamaConfig, RagConfig};
use crate::core::errors::ApiError;
use crate::llm::{GenerateRequest, LlmProvider};

const SNIPPET_CHARS: usize = 200;

/// One source chunk backing an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub source: String,
    #[serde(rename = "startIndex")]
    pub start_index: usize,
    pub snippet: String,
}

/// A grounded answer plus the chunks it was grounded in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagAnswer {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// Retriever and answer composer.
///
/// Embeds the query with the same model used at ingestion time, fetches the
/// top-k nearest chunks, and generates a grounded answer from a single
/// stuffed prompt.
pub struct RagEngine {
    llm: Arc<dyn LlmProvider>,
    store: Arc<dyn VectorStore>,
    ollama: OllamaConfig,
    rag: RagConfig,
}

impl RagEngine {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStore>,
        ollama: OllamaConfig,
        rag: RagConfig,
    ) -> Self {
        Self {
            llm,
            store,
            ollama,
            rag,
        }
    }

    pub async fn answer(&self, query: &str) -> Result<RagAnswer, ApiError> {
        let query_embedding = self
            .llm
            .embed(&[query.to_string()], &self.ollama.embedding_model)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Internal("Embedding model returned no vector".to_string()))?;

        let results = self.store.search(&query_embedding, self.rag.top_k).await?;

        let contexts: Vec<String> = results.iter().map(|r| r.chunk.content.clone()).collect();
        let prompt = answer_prompt(query, &contexts);

        let request =
            GenerateRequest::new(prompt).with_temperature(self.rag.answer_temperature);
        let answer = self.llm.generate(request, &self.ollama.model).await?;

        let sources = results
            .iter()
            .map(|r| SourceRef {
                source: r.chunk.source.clone(),
                start_index: r.chunk.start_index,
                snippet: snippet(&r.chunk.content),
            })
            .collect();

        Ok(RagAnswer { answer, sources })
    }
}

/// First 200 characters plus a trailing ellipsis marker.
fn snippet(content: &str) -> String {
    let head: String = content.chars().take(SNIPPET_CHARS).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{ChunkSplitter, SourceDocument};
    use crate::rag::{SqliteVectorStore, StoredChunk};
    use crate::testutil::{byte_frequency, MockLlm};

    #[test]
    fn snippet_is_bounded() {
        let long = "z".repeat(500);
        let s = snippet(&long);
        assert_eq!(s.chars().count(), SNIPPET_CHARS + 3);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn snippet_of_short_content_keeps_marker() {
        assert_eq!(snippet("short"), "short...");
    }

    /// Full pipeline round-trip: ingest text, split, embed, persist, then a
    /// query taken verbatim from the content must come back in the top-k.
    #[tokio::test]
    async fn round_trip_retrieves_ingested_content() {
        let doc = SourceDocument {
            text: "Article 1, Section 1 states that all citizens are equal. \
Section 2 talks about property rights. \
Article 3 regulates zoning and municipal planning boards. \
Article 4 covers inheritance and wills in detail."
                .to_string(),
            source_name: "dummy_law.pdf".to_string(),
        };

        let splitter = ChunkSplitter::new(80, 10);
        let chunks = splitter.split_documents(&[doc]);
        assert!(chunks.len() > 1);

        let llm = Arc::new(MockLlm::new("NONE", "Citizens are equal."));
        let tmp =
            std::env::temp_dir().join(format!("lexa-roundtrip-{}.db", uuid::Uuid::new_v4()));
        let store = Arc::new(SqliteVectorStore::with_path(tmp).await.unwrap());

        let items: Vec<(StoredChunk, Vec<f32>)> = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                (
                    StoredChunk {
                        chunk_id: format!("c{}", i),
                        content: chunk.content.clone(),
                        source: chunk.source_name.clone(),
                        start_index: chunk.start_index,
                    },
                    byte_frequency(&chunk.content),
                )
            })
            .collect();
        store.insert_batch(items).await.unwrap();

        let engine = RagEngine::new(
            llm,
            store,
            OllamaConfig::default(),
            RagConfig::default(),
        );

        let query = chunks[1].content.clone();
        let result = engine.answer(&query).await.unwrap();

        assert_eq!(result.answer, "Citizens are equal.");
        assert!(result.sources.len() <= RagConfig::default().top_k);
        assert!(result
            .sources
            .iter()
            .any(|s| s.snippet == format!("{}...", query)));
        assert!(result.sources.iter().all(|s| s.source == "dummy_law.pdf"));
    }
}
