//! Tool registration and dispatch.
//!
//! The registry is populated once during server construction and read-only
//! afterward. Each tool's input schema is compiled at registration so every
//! call pays only the validation cost.

use std::collections::HashMap;

use jsonschema::{Draft, Validator};
use serde_json::Value;

use crate::context::CallContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::ToolHandler;

struct RegisteredTool {
    handler: Box<dyn ToolHandler>,
    validator: Validator,
}

/// Name-keyed collection of tools, insertion order preserved.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Construction-time only; a duplicate name or an
    /// uncompilable input schema is fatal at startup.
    pub fn register(&mut self, handler: Box<dyn ToolHandler>) -> McpResult<()> {
        let definition = handler.definition();
        if self.index.contains_key(&definition.name) {
            return Err(McpError::Internal(format!(
                "duplicate tool registration: {}",
                definition.name
            )));
        }
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&definition.input_schema)
            .map_err(|e| {
                McpError::Internal(format!("invalid schema for tool {}: {e}", definition.name))
            })?;
        self.index
            .insert(definition.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool { handler, validator });
        Ok(())
    }

    /// Whether any tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// List tool metadata in registration order. Handlers are never exposed.
    pub fn list(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| tool.handler.definition())
            .collect()
    }

    /// Invoke a tool by name, validating its arguments first.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Value>,
        ctx: &CallContext,
    ) -> McpResult<ToolCallResult> {
        let tool = self
            .index
            .get(name)
            .and_then(|&i| self.tools.get(i))
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;

        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));
        if let Err(error) = tool.validator.validate(&args) {
            return Err(McpError::InvalidParams(format!(
                "arguments do not match tool schema: {error}"
            )));
        }

        tool.handler.invoke(args, ctx).await.map_err(|e| match e {
            // Argument semantics and already-classified execution failures
            // pass through; anything else is wrapped so no handler failure
            // escapes unclassified.
            McpError::InvalidParams(_) | McpError::ExecutionFailed(_) => e,
            other => McpError::ExecutionFailed(other.to_string()),
        })
    }
}
