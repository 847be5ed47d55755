//! Prompt template: "Help me discover destinations."

use async_trait::async_trait;
use serde_json::Value;

use crate::context::CallContext;
use crate::types::{
    McpError, McpResult, PromptArgument, PromptDefinition, PromptGetResult, PromptMessage,
    ToolContent,
};

use super::PromptHandler;

/// Guides a client through catalog discovery.
pub struct Discover;

#[async_trait]
impl PromptHandler for Discover {
    fn definition(&self) -> PromptDefinition {
        PromptDefinition {
            name: "discover".to_string(),
            description: Some("Guide for finding destinations that fit the traveler".to_string()),
            arguments: Some(vec![
                PromptArgument {
                    name: "interests".to_string(),
                    description: Some("What the traveler enjoys".to_string()),
                    required: true,
                },
                PromptArgument {
                    name: "season".to_string(),
                    description: Some("When the trip happens".to_string()),
                    required: false,
                },
            ]),
        }
    }

    async fn expand(&self, args: Value, _ctx: &CallContext) -> McpResult<PromptGetResult> {
        let interests = args
            .get("interests")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                McpError::InvalidParams("'interests' argument is required".to_string())
            })?;
        let season = args.get("season").and_then(Value::as_str).unwrap_or("");

        let season_line = if season.is_empty() {
            String::new()
        } else {
            format!("\nThe trip happens in: {season}\n")
        };

        let text = format!(
            "I am looking for travel destinations matching these interests:\n\n\
             {interests}\n\
             {season_line}\n\
             Please:\n\
             1. Use the catalog_search tool to see what is available\n\
             2. Use the recommend tool with my interests to rank candidates\n\
             3. Summarize the top matches and why they fit"
        );

        Ok(PromptGetResult {
            description: Some("Guide for finding destinations".to_string()),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: ToolContent::Text { text },
            }],
        })
    }
}
