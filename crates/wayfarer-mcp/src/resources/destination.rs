//! Resource: `wayfarer://destination/{id}` — a single catalog entry.

use async_trait::async_trait;

use crate::context::CallContext;
use crate::tools::CATALOG_PREFIX;
use crate::types::{
    McpError, McpResult, ReadResourceResult, ResourceContent, ResourceDefinition,
};

use super::ResourceHandler;

/// URI prefix for destination lookups.
const URI_PREFIX: &str = "wayfarer://destination/";

/// Serves one destination by its catalog id.
pub struct DestinationResource;

#[async_trait]
impl ResourceHandler for DestinationResource {
    fn definition(&self) -> ResourceDefinition {
        ResourceDefinition {
            uri: "wayfarer://destination/{id}".to_string(),
            name: "Destination".to_string(),
            description: Some("A single destination, addressed by catalog id".to_string()),
            mime_type: Some("application/json".to_string()),
        }
    }

    fn matches(&self, uri: &str) -> bool {
        uri.strip_prefix(URI_PREFIX)
            .map_or(false, |id| !id.is_empty() && id != "{id}")
    }

    async fn read(&self, uri: &str, ctx: &CallContext) -> McpResult<ReadResourceResult> {
        let id = uri
            .strip_prefix(URI_PREFIX)
            .ok_or_else(|| McpError::ResourceNotFound(uri.to_string()))?;
        let raw = ctx
            .storage
            .get(&format!("{CATALOG_PREFIX}{id}"))
            .await
            .map_err(|e| McpError::Internal(e.to_string()))?
            .ok_or_else(|| McpError::ResourceNotFound(uri.to_string()))?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContent {
                uri: uri.to_string(),
                mime_type: Some("application/json".to_string()),
                text: Some(raw),
            }],
        })
    }
}
