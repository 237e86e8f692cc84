// file: src/store/collection.rs
// description: vector collection contract consumed by the pipeline
// reference: store collaborators are injected, never reached through globals

use crate::error::Result;
use crate::models::MetadataMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Batched response of a similarity query. The store answers per query
/// text; this pipeline always issues exactly one, so the outer vectors
/// have length one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub ids: Vec<Vec<String>>,

    #[serde(default)]
    pub documents: Vec<Vec<String>>,

    #[serde(default)]
    pub metadatas: Option<Vec<Vec<MetadataMap>>>,

    #[serde(default)]
    pub distances: Option<Vec<Vec<f32>>>,
}

/// Response of a get-by-ids call. Ids with no stored document are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetResponse {
    #[serde(default)]
    pub ids: Vec<String>,

    #[serde(default)]
    pub documents: Vec<String>,
}

/// Contract of the external vector store collection. Embedding happens on
/// the store side; this crate only ships text, metadata, and ids.
#[async_trait]
pub trait VectorCollection: Send + Sync {
    fn name(&self) -> &str;

    fn metadata(&self) -> Option<&MetadataMap>;

    /// Submit a batch of chunks. All three sequences must be equal length
    /// and positionally aligned.
    async fn add(
        &self,
        texts: Vec<String>,
        metadatas: Vec<MetadataMap>,
        ids: Vec<String>,
    ) -> Result<()>;

    /// Similarity query for a single query text, best match first.
    async fn query(&self, query_text: &str, n_results: usize) -> Result<QueryResponse>;

    async fn count(&self) -> Result<usize>;

    async fn get(&self, ids: &[String]) -> Result<GetResponse>;
}
