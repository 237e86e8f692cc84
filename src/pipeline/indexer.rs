// file: src/pipeline/indexer.rs
// description: chunk id assignment and batched submission to the vector store
// reference: ids are run-scoped; re-indexing requires clearing the collection first

use crate::error::Result;
use crate::models::{ChunkMetadata, Document, IndexedRecord};
use crate::pipeline::chunker::Chunker;
use crate::store::VectorCollection;
use tracing::{debug, info};

/// Walks documents through the chunker and submits the resulting records
/// in one batched add call. The id counter is scoped to this value: one
/// `Indexer` per indexing run, counting `doc_0`, `doc_1`, ...
///
/// Not idempotent: re-running against a populated collection stores the
/// same content again under new ids.
pub struct Indexer {
    chunker: Chunker,
    next_id: usize,
}

impl Indexer {
    pub fn new(chunker: Chunker) -> Self {
        Self {
            chunker,
            next_id: 0,
        }
    }

    /// Chunk every document and submit all records at once. Returns the
    /// number of chunks submitted; an empty document set submits nothing.
    pub async fn index_documents(
        &mut self,
        documents: &[Document],
        collection: &dyn VectorCollection,
    ) -> Result<usize> {
        let mut records = Vec::new();

        for document in documents {
            for (chunk_index, text) in self.chunker.chunk(&document.content).into_iter().enumerate()
            {
                let id = format!("doc_{}", self.next_id);
                self.next_id += 1;

                records.push(IndexedRecord::new(
                    id,
                    text,
                    ChunkMetadata::new(
                        document.filename.clone(),
                        document.source.clone(),
                        chunk_index,
                    ),
                ));
            }
        }

        if records.is_empty() {
            debug!("No chunks produced, nothing to index");
            return Ok(0);
        }

        let count = records.len();
        info!("Indexing {} chunks...", count);

        let mut texts = Vec::with_capacity(count);
        let mut metadatas = Vec::with_capacity(count);
        let mut ids = Vec::with_capacity(count);
        for record in records {
            texts.push(record.chunk_text);
            metadatas.push(record.metadata.to_map());
            ids.push(record.id);
        }

        collection.add(texts, metadatas, ids).await?;
        info!("Indexing complete");

        Ok(count)
    }
}
