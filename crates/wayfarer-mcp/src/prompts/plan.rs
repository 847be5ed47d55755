//! Prompt template: "Plan my trip."

use async_trait::async_trait;
use serde_json::Value;

use crate::context::CallContext;
use crate::types::{
    McpError, McpResult, PromptArgument, PromptDefinition, PromptGetResult, PromptMessage,
    ToolContent,
};

use super::PromptHandler;

/// Guides a client through building an itinerary.
pub struct Plan;

#[async_trait]
impl PromptHandler for Plan {
    fn definition(&self) -> PromptDefinition {
        PromptDefinition {
            name: "plan".to_string(),
            description: Some("Guide for building a day-by-day itinerary".to_string()),
            arguments: Some(vec![
                PromptArgument {
                    name: "destinations".to_string(),
                    description: Some("Destinations the traveler has chosen".to_string()),
                    required: true,
                },
                PromptArgument {
                    name: "days".to_string(),
                    description: Some("Trip length in days".to_string()),
                    required: true,
                },
            ]),
        }
    }

    async fn expand(&self, args: Value, _ctx: &CallContext) -> McpResult<PromptGetResult> {
        let destinations = args
            .get("destinations")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                McpError::InvalidParams("'destinations' argument is required".to_string())
            })?;
        let days = args.get("days").and_then(Value::as_str).ok_or_else(|| {
            McpError::InvalidParams("'days' argument is required".to_string())
        })?;

        let text = format!(
            "I want a {days}-day itinerary covering:\n\n\
             {destinations}\n\n\
             Please:\n\
             1. Look up each destination with the wayfarer://destination/{{id}} resource\n\
             2. Use the plan_trip tool with the destination ids and day count\n\
             3. Flesh out each day with timing and practical notes"
        );

        Ok(PromptGetResult {
            description: Some("Guide for building an itinerary".to_string()),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: ToolContent::Text { text },
            }],
        })
    }
}
