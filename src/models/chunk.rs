// file: src/models/chunk.rs
// description: indexed chunk record and per-chunk metadata
// reference: internal data structures

use crate::models::MetadataMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata carried by every indexed chunk, positionally aligned with its
/// text and id in the batched add call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkMetadata {
    pub filename: String,
    pub source: String,
    pub chunk_index: usize,
}

impl ChunkMetadata {
    pub fn new(filename: String, source: String, chunk_index: usize) -> Self {
        Self {
            filename,
            source,
            chunk_index,
        }
    }

    /// Flatten into the free-form map shape the vector store expects.
    pub fn to_map(&self) -> MetadataMap {
        let mut map = MetadataMap::new();
        map.insert("filename".to_string(), Value::String(self.filename.clone()));
        map.insert("source".to_string(), Value::String(self.source.clone()));
        map.insert("chunk_index".to_string(), Value::from(self.chunk_index));
        map
    }
}

/// A chunk ready for submission to the vector store. Ownership passes to the
/// store once submitted; the indexer only constructs and hands it off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedRecord {
    pub id: String,
    pub chunk_text: String,
    pub metadata: ChunkMetadata,
}

impl IndexedRecord {
    pub fn new(id: String, chunk_text: String, metadata: ChunkMetadata) -> Self {
        Self {
            id,
            chunk_text,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_to_map() {
        let metadata = ChunkMetadata::new("notes.md".to_string(), "./docs/notes.md".to_string(), 2);
        let map = metadata.to_map();

        assert_eq!(map["filename"], "notes.md");
        assert_eq!(map["source"], "./docs/notes.md");
        assert_eq!(map["chunk_index"], 2);
    }

    #[test]
    fn test_indexed_record_fields() {
        let record = IndexedRecord::new(
            "doc_0".to_string(),
            "First chunk.".to_string(),
            ChunkMetadata::new("a.md".to_string(), "a.md".to_string(), 0),
        );

        assert_eq!(record.id, "doc_0");
        assert_eq!(record.metadata.chunk_index, 0);
    }
}
