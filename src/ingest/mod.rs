//! Offline ingestion: PDF extraction and chunk splitting.
//!
//! The `ingest` binary drives this module; the server only reads what it
//! persisted.

pub mod pdf;
pub mod splitter;

pub use pdf::{clean_text, load_documents, SourceDocument};
pub use splitter::{Chunk, ChunkSplitter};
