//! Retrieval-augmented generation: vector store, retriever + answer
//! composer, and document-intent classification.

pub mod engine;
pub mod intent;
pub mod prompts;
pub mod sqlite;
pub mod store;

pub use engine::{RagAnswer, RagEngine, SourceRef};
pub use intent::IntentClassifier;
pub use sqlite::SqliteVectorStore;
pub use store::{ChunkSearchResult, StoredChunk, VectorStore};
