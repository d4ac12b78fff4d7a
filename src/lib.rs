//! Legal-assistant backend: retrieval-augmented generation over ingested
//! legal PDFs, plus template-based document filling.

pub mod core;
pub mod documents;
pub mod ingest;
pub mod llm;
pub mod rag;
pub mod server;
pub mod state;

#[cfg(test)]
pub mod testutil;
