//! Tool: plan_trip — build a day-by-day itinerary from chosen destinations.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::context::CallContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::{ToolHandler, CATALOG_PREFIX};

/// Longest trip the planner will lay out. Bounds the per-request
/// allocation: one inner vec is built per day.
const MAX_TRIP_DAYS: u64 = 365;

/// Spreads the requested destinations across the trip days in order.
pub struct PlanTrip;

#[async_trait]
impl ToolHandler for PlanTrip {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "plan_trip".to_string(),
            description: Some(
                "Build a day-by-day itinerary for a set of destination ids".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "destination_ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1,
                        "description": "Catalog ids of the destinations to visit, in preference order"
                    },
                    "days": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": MAX_TRIP_DAYS,
                        "description": "Trip length in days"
                    }
                },
                "required": ["destination_ids", "days"]
            }),
        }
    }

    async fn invoke(&self, args: Value, ctx: &CallContext) -> McpResult<ToolCallResult> {
        let ids: Vec<&str> = args
            .get("destination_ids")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        // Re-checked here in u64, before any cast or allocation, so the
        // bound holds even when the handler is called without going through
        // the registry's schema validation.
        let days = args.get("days").and_then(Value::as_u64).unwrap_or(1);
        if days == 0 || days > MAX_TRIP_DAYS {
            return Err(McpError::InvalidParams(format!(
                "days must be between 1 and {MAX_TRIP_DAYS}"
            )));
        }
        let days = days as usize;

        let mut destinations = Vec::with_capacity(ids.len());
        for id in &ids {
            let raw = ctx
                .storage
                .get(&format!("{CATALOG_PREFIX}{id}"))
                .await
                .map_err(|e| McpError::Internal(e.to_string()))?
                .ok_or_else(|| {
                    McpError::ExecutionFailed(format!("unknown destination id: {id}"))
                })?;
            let dest: Value = serde_json::from_str(&raw).map_err(|e| {
                McpError::ExecutionFailed(format!("corrupt catalog entry for {id}: {e}"))
            })?;
            destinations.push(dest);
        }

        // Round-robin the destinations over the days, preserving order.
        let mut schedule: Vec<Vec<&Value>> = vec![Vec::new(); days];
        for (i, dest) in destinations.iter().enumerate() {
            schedule[i % days].push(dest);
        }
        let itinerary: Vec<Value> = schedule
            .iter()
            .enumerate()
            .map(|(day, stops)| {
                json!({
                    "day": day + 1,
                    "stops": stops,
                })
            })
            .collect();

        Ok(ToolCallResult::json(&json!({
            "days": days,
            "destination_count": destinations.len(),
            "itinerary": itinerary,
        })))
    }
}
