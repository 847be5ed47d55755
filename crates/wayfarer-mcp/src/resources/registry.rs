//! Resource registration and dispatch.

use std::collections::HashSet;

use crate::context::CallContext;
use crate::types::{McpError, McpResult, ReadResourceResult, ResourceDefinition};

use super::ResourceHandler;

/// URI-keyed collection of resources, insertion order preserved.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: Vec<Box<dyn ResourceHandler>>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource. Construction-time only; a duplicate URI is
    /// fatal at startup.
    pub fn register(&mut self, handler: Box<dyn ResourceHandler>) -> McpResult<()> {
        let uri = handler.definition().uri;
        let known: HashSet<String> = self
            .resources
            .iter()
            .map(|r| r.definition().uri)
            .collect();
        if known.contains(&uri) {
            return Err(McpError::Internal(format!(
                "duplicate resource registration: {uri}"
            )));
        }
        self.resources.push(handler);
        Ok(())
    }

    /// Whether any resources are registered.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// List resource metadata in registration order.
    pub fn list(&self) -> Vec<ResourceDefinition> {
        self.resources.iter().map(|r| r.definition()).collect()
    }

    /// Read a resource by URI: first registered handler that matches wins.
    pub async fn read(&self, uri: &str, ctx: &CallContext) -> McpResult<ReadResourceResult> {
        let handler = self
            .resources
            .iter()
            .find(|r| r.matches(uri))
            .ok_or_else(|| McpError::ResourceNotFound(uri.to_string()))?;
        handler.read(uri, ctx).await.map_err(|e| match e {
            McpError::InvalidParams(_)
            | McpError::ResourceNotFound(_)
            | McpError::ExecutionFailed(_) => e,
            other => McpError::ExecutionFailed(other.to_string()),
        })
    }
}
