// file: src/models/document.rs
// description: source document model produced by the loader
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub filename: String,
    pub source: String,
}

impl Document {
    pub fn new(content: String, filename: String, source: String) -> Self {
        Self {
            content,
            filename,
            source,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new(
            "# Notes".to_string(),
            "notes.md".to_string(),
            "./my_documents/notes.md".to_string(),
        );

        assert_eq!(doc.filename, "notes.md");
        assert_eq!(doc.source, "./my_documents/notes.md");
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_whitespace_only_document_is_empty() {
        let doc = Document::new(
            "  \n\t ".to_string(),
            "blank.txt".to_string(),
            "blank.txt".to_string(),
        );
        assert!(doc.is_empty());
    }
}
