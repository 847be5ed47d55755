//! MCP request parameter types for tools, resources, and prompts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for tools/call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallParams {
    /// Tool name.
    pub name: String,
    /// Tool arguments.
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Parameters for resources/read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceReadParams {
    /// Resource URI.
    pub uri: String,
}

/// Parameters for prompts/get.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptGetParams {
    /// Prompt name.
    pub name: String,
    /// Prompt arguments.
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Parameters for logging/setLevel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetLevelParams {
    /// Requested level: debug, info, notice, warning, error, critical,
    /// alert, or emergency.
    pub level: String,
}

/// Extract the caller-supplied API key from a request's params.
///
/// The key travels in `params._meta.apiKey`, with a top-level
/// `params.apiKey` accepted as a fallback.
pub fn extract_api_key(params: Option<&Value>) -> Option<String> {
    let params = params?;
    params
        .get("_meta")
        .and_then(|meta| meta.get("apiKey"))
        .or_else(|| params.get("apiKey"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
