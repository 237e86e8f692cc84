// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod answer;
pub mod chunker;
pub mod indexer;
pub mod orchestrator;
pub mod retriever;

pub use answer::{NO_INFORMATION_FALLBACK, generate_answer};
pub use chunker::Chunker;
pub use indexer::Indexer;
pub use orchestrator::{AskOutcome, KnowledgeBase};
pub use retriever::search_knowledge_base;
