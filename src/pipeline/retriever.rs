// file: src/pipeline/retriever.rs
// description: similarity search and response normalization
// reference: ranking is delegated entirely to the vector store

use crate::error::{KbError, Result};
use crate::models::RetrievedChunk;
use crate::store::VectorCollection;
use tracing::debug;

/// Query the collection and normalize the batched response into ranked
/// chunk records, best match first.
///
/// Exactly one query is issued, so only the first result batch is read.
/// Missing distances are preserved as `None`. An empty result is a valid
/// outcome, not an error.
pub async fn search_knowledge_base(
    query: &str,
    collection: &dyn VectorCollection,
    n_results: usize,
) -> Result<Vec<RetrievedChunk>> {
    if n_results == 0 {
        return Err(KbError::Config(
            "n_results must be greater than 0".to_string(),
        ));
    }

    let response = collection.query(query, n_results).await?;

    let documents = response.documents.into_iter().next().unwrap_or_default();
    let metadatas = response
        .metadatas
        .and_then(|batches| batches.into_iter().next())
        .unwrap_or_default();
    let distances = response
        .distances
        .and_then(|batches| batches.into_iter().next())
        .unwrap_or_default();

    let chunks: Vec<RetrievedChunk> = documents
        .into_iter()
        .enumerate()
        .map(|(rank, content)| {
            RetrievedChunk::new(
                content,
                metadatas.get(rank).cloned().unwrap_or_default(),
                distances.get(rank).copied(),
            )
        })
        .collect();

    debug!("Query returned {} chunks", chunks.len());
    Ok(chunks)
}
