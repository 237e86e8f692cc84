// file: src/store/chroma.rs
// description: Chroma HTTP client with explicit collection lifecycle
// reference: https://docs.trychroma.com/reference

use crate::error::{KbError, Result};
use crate::models::MetadataMap;
use crate::store::collection::{GetResponse, QueryResponse, VectorCollection};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub metadata: Option<MetadataMap>,
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a MetadataMap>,
}

#[derive(Debug, Serialize)]
struct AddRequest {
    ids: Vec<String>,
    documents: Vec<String>,
    metadatas: Vec<MetadataMap>,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query_texts: Vec<&'a str>,
    n_results: usize,
}

#[derive(Debug, Serialize)]
struct GetRequest<'a> {
    ids: &'a [String],
}

/// Client for a Chroma-style vector store HTTP API. The store computes
/// embeddings server-side; this client only moves text, metadata, and ids.
#[derive(Clone)]
pub struct ChromaClient {
    http: Client,
    base_url: String,
}

impl ChromaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn collections_url(&self) -> String {
        format!("{}/api/v1/collections", self.base_url)
    }

    /// Look up a collection by name. A missing collection is a typed
    /// not-found, distinct from transport or server failures.
    pub async fn get_collection(&self, name: &str) -> Result<ChromaCollection> {
        let url = format!("{}/{}", self.collections_url(), name);
        debug!("Fetching collection: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| KbError::Store(format!("Failed to reach vector store: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(KbError::CollectionNotFound(name.to_string()));
        }

        let response = check_status(response, "Collection lookup").await?;
        let info: CollectionInfo = response
            .json()
            .await
            .map_err(|e| KbError::Store(format!("Failed to parse collection response: {e}")))?;

        Ok(self.collection(info))
    }

    pub async fn create_collection(
        &self,
        name: &str,
        metadata: Option<MetadataMap>,
    ) -> Result<ChromaCollection> {
        let request = CreateCollectionRequest {
            name,
            metadata: metadata.as_ref(),
        };

        let response = self
            .http
            .post(self.collections_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| KbError::Store(format!("Failed to reach vector store: {e}")))?;

        let response = check_status(response, "Collection creation").await?;
        let info: CollectionInfo = response
            .json()
            .await
            .map_err(|e| KbError::Store(format!("Failed to parse collection response: {e}")))?;

        info!("Created new collection: {}", info.name);
        Ok(self.collection(info))
    }

    /// Explicit get-then-create: only a not-found outcome triggers
    /// creation, every other failure propagates.
    pub async fn create_or_get_collection(&self, name: &str) -> Result<ChromaCollection> {
        match self.get_collection(name).await {
            Ok(collection) => {
                info!("Found existing collection: {}", name);
                Ok(collection)
            }
            Err(KbError::CollectionNotFound(_)) => {
                let mut metadata = MetadataMap::new();
                metadata.insert(
                    "description".to_string(),
                    serde_json::Value::String("Personal knowledge base".to_string()),
                );
                self.create_collection(name, Some(metadata)).await
            }
            Err(e) => Err(e),
        }
    }

    pub async fn delete_collection(&self, name: &str) -> Result<()> {
        let url = format!("{}/{}", self.collections_url(), name);

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| KbError::Store(format!("Failed to reach vector store: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(KbError::CollectionNotFound(name.to_string()));
        }

        check_status(response, "Collection deletion").await?;
        info!("Deleted collection: {}", name);
        Ok(())
    }

    fn collection(&self, info: CollectionInfo) -> ChromaCollection {
        ChromaCollection {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            info,
        }
    }
}

/// Handle to one remote collection, bound to its server-assigned id.
#[derive(Clone)]
pub struct ChromaCollection {
    http: Client,
    base_url: String,
    info: CollectionInfo,
}

impl ChromaCollection {
    fn url(&self, operation: &str) -> String {
        format!(
            "{}/api/v1/collections/{}/{}",
            self.base_url, self.info.id, operation
        )
    }

    pub fn info(&self) -> &CollectionInfo {
        &self.info
    }
}

#[async_trait]
impl VectorCollection for ChromaCollection {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn metadata(&self) -> Option<&MetadataMap> {
        self.info.metadata.as_ref()
    }

    async fn add(
        &self,
        texts: Vec<String>,
        metadatas: Vec<MetadataMap>,
        ids: Vec<String>,
    ) -> Result<()> {
        debug_assert_eq!(texts.len(), metadatas.len());
        debug_assert_eq!(texts.len(), ids.len());

        let batch_len = texts.len();
        let request = AddRequest {
            ids,
            documents: texts,
            metadatas,
        };

        let response = self
            .http
            .post(self.url("add"))
            .json(&request)
            .send()
            .await
            .map_err(|e| KbError::Store(format!("Failed to reach vector store: {e}")))?;

        check_status(response, "Add").await?;
        debug!("Submitted {} chunks to collection {}", batch_len, self.info.name);
        Ok(())
    }

    async fn query(&self, query_text: &str, n_results: usize) -> Result<QueryResponse> {
        let request = QueryRequest {
            query_texts: vec![query_text],
            n_results,
        };

        let response = self
            .http
            .post(self.url("query"))
            .json(&request)
            .send()
            .await
            .map_err(|e| KbError::Store(format!("Failed to reach vector store: {e}")))?;

        let response = check_status(response, "Query").await?;
        response
            .json()
            .await
            .map_err(|e| KbError::Store(format!("Failed to parse query response: {e}")))
    }

    async fn count(&self) -> Result<usize> {
        let response = self
            .http
            .get(self.url("count"))
            .send()
            .await
            .map_err(|e| KbError::Store(format!("Failed to reach vector store: {e}")))?;

        let response = check_status(response, "Count").await?;
        response
            .json()
            .await
            .map_err(|e| KbError::Store(format!("Failed to parse count response: {e}")))
    }

    async fn get(&self, ids: &[String]) -> Result<GetResponse> {
        let request = GetRequest { ids };

        let response = self
            .http
            .post(self.url("get"))
            .json(&request)
            .send()
            .await
            .map_err(|e| KbError::Store(format!("Failed to reach vector store: {e}")))?;

        let response = check_status(response, "Get").await?;
        response
            .json()
            .await
            .map_err(|e| KbError::Store(format!("Failed to parse get response: {e}")))
    }
}

async fn check_status(response: reqwest::Response, operation: &str) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(KbError::Store(format!(
        "{operation} failed with status {status}: {body}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ChromaClient::new("http://localhost:8000/");
        assert_eq!(client.collections_url(), "http://localhost:8000/api/v1/collections");
    }

    #[test]
    fn test_collection_operation_urls() {
        let client = ChromaClient::new("http://localhost:8000");
        let collection = client.collection(CollectionInfo {
            id: "c0ffee".to_string(),
            name: "knowledge_base".to_string(),
            metadata: None,
        });

        assert_eq!(
            collection.url("query"),
            "http://localhost:8000/api/v1/collections/c0ffee/query"
        );
        assert_eq!(collection.name(), "knowledge_base");
    }

    #[test]
    fn test_add_request_serialization() {
        let request = AddRequest {
            ids: vec!["doc_0".to_string()],
            documents: vec!["chunk".to_string()],
            metadatas: vec![MetadataMap::new()],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["ids"][0], "doc_0");
        assert_eq!(json["documents"][0], "chunk");
    }
}
