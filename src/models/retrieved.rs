// file: src/models/retrieved.rs
// description: retrieved chunk model with optional similarity distance
// reference: produced per query, consumed by the answer assembler

use crate::models::MetadataMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Chunk text as stored.
    pub content: String,

    /// Metadata map as stored; arbitrary keys are allowed for documents
    /// added through the tool surface.
    pub metadata: MetadataMap,

    /// Distance reported by the store, lower is more similar. Absent when
    /// the store does not report one.
    pub distance: Option<f32>,
}

impl RetrievedChunk {
    pub fn new(content: String, metadata: MetadataMap, distance: Option<f32>) -> Self {
        Self {
            content,
            metadata,
            distance,
        }
    }

    /// Source filename for attribution, falling back when the metadata does
    /// not carry one.
    pub fn filename(&self) -> &str {
        self.metadata
            .get("filename")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, max_content_len: usize) -> String {
        let preview: String = if self.content.chars().count() > max_content_len {
            let truncated: String = self.content.chars().take(max_content_len).collect();
            format!("{truncated}...")
        } else {
            self.content.clone()
        };

        match self.distance {
            Some(distance) => format!("Distance: {:.4} | {}\n{}\n", distance, self.filename(), preview),
            None => format!("{}\n{}\n", self.filename(), preview),
        }
    }
}
