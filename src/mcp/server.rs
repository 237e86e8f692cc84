// file: src/mcp/server.rs
// description: MCP server exposing the knowledge base tool surface
// reference: https://docs.rs/rmcp

use crate::models::MetadataMap;
use crate::pipeline::retriever::search_knowledge_base;
use crate::store::VectorCollection;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::tool::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const DEFAULT_SEARCH_RESULTS: usize = 5;

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// The search query
    pub query: String,

    /// Number of results to return (default: 5)
    pub n_results: Option<usize>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AddDocumentRequest {
    /// The document text to add
    pub text: String,

    /// Optional metadata map stored alongside the document
    pub metadata: Option<MetadataMap>,

    /// Optional document ID, auto-generated when absent
    pub doc_id: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetDocumentRequest {
    /// The document ID to fetch
    pub doc_id: String,
}

#[derive(Clone)]
pub struct KnowledgeBaseMcp {
    collection: Arc<dyn VectorCollection>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl KnowledgeBaseMcp {
    pub fn new(collection: Arc<dyn VectorCollection>) -> Self {
        Self {
            collection,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the knowledge base for relevant document chunks. Returns ranked matches with metadata and distances."
    )]
    async fn search_knowledge_base(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let n_results = request.n_results.unwrap_or(DEFAULT_SEARCH_RESULTS);
        info!("MCP: searching for: {}", request.query);

        let chunks = search_knowledge_base(&request.query, self.collection.as_ref(), n_results)
            .await
            .map_err(to_mcp_error)?;

        let results: Vec<serde_json::Value> = chunks
            .iter()
            .map(|chunk| {
                json!({
                    "document": chunk.content,
                    "metadata": chunk.metadata,
                    "distance": chunk.distance,
                })
            })
            .collect();

        let payload = json!({
            "query": request.query,
            "results": results,
            "count": results.len(),
        });

        let text = serde_json::to_string_pretty(&payload)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Add a document to the knowledge base.")]
    async fn add_document(
        &self,
        Parameters(request): Parameters<AddDocumentRequest>,
    ) -> Result<CallToolResult, McpError> {
        let doc_id = request
            .doc_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let metadata = request.metadata.unwrap_or_default();

        info!("MCP: adding document {}", doc_id);

        self.collection
            .add(vec![request.text], vec![metadata], vec![doc_id.clone()])
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Document added successfully with ID: {doc_id}"
        ))]))
    }

    #[tool(description = "Get statistics about the knowledge base collection.")]
    async fn get_collection_stats(&self) -> Result<CallToolResult, McpError> {
        let count = self.collection.count().await.map_err(to_mcp_error)?;

        let payload = json!({
            "name": self.collection.name(),
            "document_count": count,
            "metadata": self.collection.metadata(),
        });

        let text = serde_json::to_string_pretty(&payload)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Fetch the raw text of a stored document by its ID.")]
    async fn get_document(
        &self,
        Parameters(request): Parameters<GetDocumentRequest>,
    ) -> Result<CallToolResult, McpError> {
        let response = self
            .collection
            .get(std::slice::from_ref(&request.doc_id))
            .await
            .map_err(to_mcp_error)?;

        let text = match response.documents.into_iter().next() {
            Some(document) => document,
            None => format!("Document {} not found", request.doc_id),
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for KnowledgeBaseMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Knowledge base RAG server. Search indexed personal documents, add new \
                 documents, and inspect collection statistics."
                    .to_string(),
            ),
        }
    }
}

fn to_mcp_error(error: crate::error::KbError) -> McpError {
    McpError::internal_error(error.to_string(), None)
}
