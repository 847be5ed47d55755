//! Tool: catalog_search — list destinations, optionally filtered.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::context::CallContext;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::{load_catalog, ToolHandler};

/// Lists the destination catalog with optional category/status filters.
/// Filtering is this tool's own responsibility, not the registry's.
pub struct CatalogSearch;

#[async_trait]
impl ToolHandler for CatalogSearch {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "catalog_search".to_string(),
            description: Some(
                "Search the destination catalog, optionally filtered by category, \
                 status, or a free-text query"
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Only destinations in this category (e.g. beach, city, trek)"
                    },
                    "status": {
                        "type": "string",
                        "description": "Only destinations with this status (e.g. open, seasonal)"
                    },
                    "query": {
                        "type": "string",
                        "description": "Case-insensitive match against name and summary"
                    }
                }
            }),
        }
    }

    async fn invoke(&self, args: Value, ctx: &CallContext) -> McpResult<ToolCallResult> {
        let category = args.get("category").and_then(Value::as_str);
        let status = args.get("status").and_then(Value::as_str);
        let query = args
            .get("query")
            .and_then(Value::as_str)
            .map(str::to_lowercase);

        let destinations: Vec<Value> = load_catalog(ctx)
            .await?
            .into_iter()
            .filter(|dest| {
                category.map_or(true, |c| dest.get("category").and_then(Value::as_str) == Some(c))
            })
            .filter(|dest| {
                status.map_or(true, |s| dest.get("status").and_then(Value::as_str) == Some(s))
            })
            .filter(|dest| {
                query.as_deref().map_or(true, |q| {
                    let name = dest.get("name").and_then(Value::as_str).unwrap_or("");
                    let summary = dest.get("summary").and_then(Value::as_str).unwrap_or("");
                    name.to_lowercase().contains(q) || summary.to_lowercase().contains(q)
                })
            })
            .collect();

        Ok(ToolCallResult::json(&json!({
            "count": destinations.len(),
            "destinations": destinations,
        })))
    }
}
