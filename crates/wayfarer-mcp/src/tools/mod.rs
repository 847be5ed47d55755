//! MCP tools: the invocable units of the Wayfarer server.

pub mod catalog_search;
pub mod plan_trip;
pub mod recommend;
pub mod registry;

pub use registry::ToolRegistry;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::CallContext;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

/// A registered tool: metadata plus an invocation handler.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// The tool's name, description, and input schema.
    fn definition(&self) -> ToolDefinition;

    /// Run the tool. Arguments have already passed schema validation.
    async fn invoke(&self, args: Value, ctx: &CallContext) -> McpResult<ToolCallResult>;
}

/// Build the default tool set.
pub fn default_tools() -> Vec<Box<dyn ToolHandler>> {
    vec![
        Box::new(catalog_search::CatalogSearch),
        Box::new(recommend::Recommend),
        Box::new(plan_trip::PlanTrip),
    ]
}

/// Storage namespace for catalog entries: `catalog:{id}` -> destination JSON.
pub(crate) const CATALOG_PREFIX: &str = "catalog:";

/// Load every destination in the catalog namespace.
pub(crate) async fn load_catalog(ctx: &CallContext) -> McpResult<Vec<Value>> {
    let keys = ctx
        .storage
        .list(CATALOG_PREFIX)
        .await
        .map_err(|e| crate::types::McpError::Internal(e.to_string()))?;
    let mut destinations = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(raw) = ctx
            .storage
            .get(&key)
            .await
            .map_err(|e| crate::types::McpError::Internal(e.to_string()))?
        else {
            continue;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => destinations.push(value),
            Err(e) => tracing::warn!("skipping malformed catalog entry {key}: {e}"),
        }
    }
    Ok(destinations)
}
