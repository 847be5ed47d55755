//! Resource: `wayfarer://catalog` — the full destination catalog.

use async_trait::async_trait;
use serde_json::json;

use crate::context::CallContext;
use crate::tools::load_catalog;
use crate::types::{McpResult, ReadResourceResult, ResourceContent, ResourceDefinition};

use super::ResourceHandler;

/// URI of the catalog resource.
const URI: &str = "wayfarer://catalog";

/// Serves the whole catalog as one JSON document.
pub struct CatalogResource;

#[async_trait]
impl ResourceHandler for CatalogResource {
    fn definition(&self) -> ResourceDefinition {
        ResourceDefinition {
            uri: URI.to_string(),
            name: "Destination catalog".to_string(),
            description: Some("All destinations known to this server".to_string()),
            mime_type: Some("application/json".to_string()),
        }
    }

    fn matches(&self, uri: &str) -> bool {
        uri == URI
    }

    async fn read(&self, uri: &str, ctx: &CallContext) -> McpResult<ReadResourceResult> {
        let destinations = load_catalog(ctx).await?;
        let text = serde_json::to_string_pretty(&json!({
            "count": destinations.len(),
            "destinations": destinations,
        }))
        .map_err(|e| crate::types::McpError::Internal(e.to_string()))?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContent {
                uri: uri.to_string(),
                mime_type: Some("application/json".to_string()),
                text: Some(text),
            }],
        })
    }
}
