// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod llm;
pub mod loader;
pub mod mcp;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod utils;

pub use config::{ChunkingConfig, CompletionConfig, Config, DocumentsConfig, StoreConfig};
pub use error::{KbError, Result};
pub use llm::{ChatCompletionClient, CompletionService};
pub use loader::load_documents;
pub use models::{ChunkMetadata, Document, IndexedRecord, MetadataMap, RetrievedChunk};
pub use pipeline::{
    AskOutcome, Chunker, Indexer, KnowledgeBase, NO_INFORMATION_FALLBACK, generate_answer,
    search_knowledge_base,
};
pub use store::{ChromaClient, ChromaCollection, CollectionInfo, VectorCollection};
