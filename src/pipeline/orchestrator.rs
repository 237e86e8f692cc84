// file: src/pipeline/orchestrator.rs
// description: knowledge base facade composing chunking, retrieval, and answering
// reference: collaborators are injected, one call at a time, no shared mutable state

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::llm::CompletionService;
use crate::models::Document;
use crate::pipeline::answer::generate_answer;
use crate::pipeline::chunker::Chunker;
use crate::pipeline::indexer::Indexer;
use crate::pipeline::retriever::search_knowledge_base;
use crate::store::VectorCollection;
use std::sync::Arc;
use tracing::info;

/// Outcome of an ask: either a grounded answer with its sources, or an
/// explicit no-information signal. The empty-retrieval path never reaches
/// the completion service.
#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    Answer { text: String, sources: Vec<String> },
    NoRelevantInformation,
}

pub struct KnowledgeBase {
    collection: Arc<dyn VectorCollection>,
    completions: Arc<dyn CompletionService>,
    chunker: Chunker,
}

impl KnowledgeBase {
    pub fn new(
        collection: Arc<dyn VectorCollection>,
        completions: Arc<dyn CompletionService>,
        chunking: &ChunkingConfig,
    ) -> Result<Self> {
        Ok(Self {
            collection,
            completions,
            chunker: Chunker::new(chunking.chunk_size, chunking.overlap)?,
        })
    }

    pub fn collection(&self) -> &dyn VectorCollection {
        self.collection.as_ref()
    }

    /// Index a document set as one run with a fresh id sequence. Callers
    /// wanting a re-index must clear the collection first.
    pub async fn index(&self, documents: &[Document]) -> Result<usize> {
        let mut indexer = Indexer::new(self.chunker.clone());
        indexer
            .index_documents(documents, self.collection.as_ref())
            .await
    }

    /// Retrieve context for the query and produce a grounded answer.
    pub async fn ask(&self, query: &str, n_results: usize) -> Result<AskOutcome> {
        let chunks = search_knowledge_base(query, self.collection.as_ref(), n_results).await?;

        if chunks.is_empty() {
            info!("No relevant chunks found for query");
            return Ok(AskOutcome::NoRelevantInformation);
        }

        let sources: Vec<String> = chunks
            .iter()
            .map(|chunk| chunk.filename().to_string())
            .collect();

        let text = generate_answer(query, &chunks, self.completions.as_ref()).await?;
        Ok(AskOutcome::Answer { text, sources })
    }
}
