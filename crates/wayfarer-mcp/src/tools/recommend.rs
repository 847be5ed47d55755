//! Tool: recommend — score destinations against caller interests.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::context::CallContext;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::{load_catalog, ToolHandler};

/// Default number of recommendations returned.
const DEFAULT_LIMIT: usize = 5;

/// Ranks catalog destinations by tag overlap with the caller's interests,
/// breaking ties on rating.
pub struct Recommend;

#[async_trait]
impl ToolHandler for Recommend {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "recommend".to_string(),
            description: Some(
                "Recommend destinations matching a list of interests".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "interests": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1,
                        "description": "Interest tags, e.g. hiking, food, history"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Maximum number of recommendations"
                    }
                },
                "required": ["interests"]
            }),
        }
    }

    async fn invoke(&self, args: Value, ctx: &CallContext) -> McpResult<ToolCallResult> {
        let interests: Vec<String> = args
            .get("interests")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_lowercase)
                    .collect()
            })
            .unwrap_or_default();
        let limit = args
            .get("limit")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_LIMIT);

        let mut scored: Vec<(f64, Value)> = load_catalog(ctx)
            .await?
            .into_iter()
            .map(|dest| {
                let tags: Vec<String> = dest
                    .get("tags")
                    .and_then(Value::as_array)
                    .map(|tags| {
                        tags.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_lowercase)
                            .collect()
                    })
                    .unwrap_or_default();
                let overlap = interests.iter().filter(|i| tags.contains(i)).count();
                let rating = dest.get("rating").and_then(Value::as_f64).unwrap_or(0.0);
                // Tag overlap dominates; rating only breaks ties.
                let score = overlap as f64 + rating / 10.0;
                (score, dest)
            })
            .filter(|(score, _)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        let recommendations: Vec<Value> = scored
            .into_iter()
            .take(limit)
            .map(|(score, dest)| json!({ "score": score, "destination": dest }))
            .collect();

        Ok(ToolCallResult::json(&json!({
            "count": recommendations.len(),
            "recommendations": recommendations,
        })))
    }
}
