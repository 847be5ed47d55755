//! MCP prompts: guided templates for travel discovery and planning.

pub mod discover;
pub mod plan;
pub mod registry;

pub use registry::PromptRegistry;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::CallContext;
use crate::types::{McpResult, PromptDefinition, PromptGetResult};

/// A registered prompt template.
#[async_trait]
pub trait PromptHandler: Send + Sync {
    /// The prompt's name, description, and arguments.
    fn definition(&self) -> PromptDefinition;

    /// Expand the prompt with the given arguments.
    async fn expand(&self, args: Value, ctx: &CallContext) -> McpResult<PromptGetResult>;
}

/// Build the default prompt set.
pub fn default_prompts() -> Vec<Box<dyn PromptHandler>> {
    vec![Box::new(discover::Discover), Box::new(plan::Plan)]
}
