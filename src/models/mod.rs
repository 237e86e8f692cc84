// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod chunk;
pub mod document;
pub mod retrieved;

pub use chunk::{ChunkMetadata, IndexedRecord};
pub use document::Document;
pub use retrieved::RetrievedChunk;

/// Free-form metadata attached to a stored chunk or collection.
pub type MetadataMap = serde_json::Map<String, serde_json::Value>;
