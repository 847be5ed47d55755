//! Prompt registration and dispatch.

use std::collections::HashMap;

use serde_json::Value;

use crate::context::CallContext;
use crate::types::{McpError, McpResult, PromptDefinition, PromptGetResult};

use super::PromptHandler;

/// Name-keyed collection of prompts, insertion order preserved.
#[derive(Default)]
pub struct PromptRegistry {
    prompts: Vec<Box<dyn PromptHandler>>,
    index: HashMap<String, usize>,
}

impl PromptRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prompt. Construction-time only; a duplicate name is
    /// fatal at startup.
    pub fn register(&mut self, handler: Box<dyn PromptHandler>) -> McpResult<()> {
        let name = handler.definition().name;
        if self.index.contains_key(&name) {
            return Err(McpError::Internal(format!(
                "duplicate prompt registration: {name}"
            )));
        }
        self.index.insert(name, self.prompts.len());
        self.prompts.push(handler);
        Ok(())
    }

    /// Whether any prompts are registered.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// List prompt metadata in registration order.
    pub fn list(&self) -> Vec<PromptDefinition> {
        self.prompts.iter().map(|p| p.definition()).collect()
    }

    /// Expand a prompt by name.
    pub async fn get(
        &self,
        name: &str,
        arguments: Option<Value>,
        ctx: &CallContext,
    ) -> McpResult<PromptGetResult> {
        let prompt = self
            .index
            .get(name)
            .and_then(|&i| self.prompts.get(i))
            .ok_or_else(|| McpError::PromptNotFound(name.to_string()))?;
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));
        prompt.expand(args, ctx).await.map_err(|e| match e {
            McpError::InvalidParams(_) | McpError::ExecutionFailed(_) => e,
            other => McpError::ExecutionFailed(other.to_string()),
        })
    }
}
