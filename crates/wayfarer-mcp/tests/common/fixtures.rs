//! Test data fixtures for MCP server tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use wayfarer_mcp::config::{AuthConfig, ServerConfig};
use wayfarer_mcp::context::CallContext;
use wayfarer_mcp::prompts::PromptRegistry;
use wayfarer_mcp::protocol::ProtocolHandler;
use wayfarer_mcp::resources::ResourceRegistry;
use wayfarer_mcp::storage::MemoryStorage;
use wayfarer_mcp::tools::{ToolHandler, ToolRegistry};
use wayfarer_mcp::types::{
    JsonRpcMessage, JsonRpcRequest, McpResult, RequestId, ToolCallResult, ToolDefinition,
};

/// A tool that echoes its `text` argument back.
pub struct EchoTool;

#[async_trait]
impl ToolHandler for EchoTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "echo".to_string(),
            description: Some("Echo the given text".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            }),
        }
    }

    async fn invoke(&self, args: Value, _ctx: &CallContext) -> McpResult<ToolCallResult> {
        let text = args.get("text").and_then(Value::as_str).unwrap_or("");
        Ok(ToolCallResult::text(text.to_string()))
    }
}

/// Storage seeded with one registered key and its index entry.
pub async fn seeded_storage() -> Arc<MemoryStorage> {
    Arc::new(
        MemoryStorage::seeded([
            ("auth:key:alice".to_string(), "alice-key-123".to_string()),
            (
                "auth:index:alice-key-123".to_string(),
                "alice".to_string(),
            ),
        ])
        .await,
    )
}

/// Storage seeded with a small destination catalog.
pub async fn catalog_storage() -> Arc<MemoryStorage> {
    let lisbon = json!({
        "id": "lisbon",
        "name": "Lisbon",
        "country": "Portugal",
        "category": "city",
        "status": "open",
        "tags": ["food", "history", "coast"],
        "rating": 4.6,
        "summary": "Hillside capital with pastel facades and grilled sardines"
    });
    let patagonia = json!({
        "id": "patagonia",
        "name": "Patagonia",
        "country": "Argentina",
        "category": "trek",
        "status": "seasonal",
        "tags": ["hiking", "glaciers", "wildlife"],
        "rating": 4.9,
        "summary": "Granite spires and windswept steppe at the end of the world"
    });
    let kyoto = json!({
        "id": "kyoto",
        "name": "Kyoto",
        "country": "Japan",
        "category": "city",
        "status": "open",
        "tags": ["history", "temples", "food"],
        "rating": 4.8,
        "summary": "Former imperial capital of gardens and wooden temples"
    });
    Arc::new(
        MemoryStorage::seeded([
            ("catalog:lisbon".to_string(), lisbon.to_string()),
            ("catalog:patagonia".to_string(), patagonia.to_string()),
            ("catalog:kyoto".to_string(), kyoto.to_string()),
        ])
        .await,
    )
}

/// Auth configuration with everything off except what the test enables.
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        require_auth: true,
        admin_key: Some("admin-secret".to_string()),
        enable_key_index: false,
        enable_fallback_scan: false,
        fallback_scan_rate_limit: 100,
        fallback_scan_budget: 100,
    }
}

/// Server config wrapping the given auth settings.
pub fn server_config(auth: AuthConfig) -> ServerConfig {
    ServerConfig {
        auth,
        log_level: None,
        data_file: None,
    }
}

/// A handler whose only registered unit is the echo tool.
pub fn echo_handler(config: ServerConfig, storage: Arc<MemoryStorage>) -> ProtocolHandler {
    let mut tools = ToolRegistry::new();
    tools
        .register(Box::new(EchoTool))
        .expect("echo registration");
    ProtocolHandler::with_registries(
        config,
        storage,
        tools,
        ResourceRegistry::new(),
        PromptRegistry::new(),
    )
}

/// Build a request message.
pub fn request(id: i64, method: &str, params: Option<Value>) -> JsonRpcMessage {
    JsonRpcMessage::Request(JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: RequestId::Number(id),
        method: method.to_string(),
        params,
    })
}

/// Send a request and unwrap the response value.
pub async fn call(handler: &ProtocolHandler, method: &str, params: Option<Value>) -> Value {
    handler
        .handle_message(request(1, method, params))
        .await
        .expect("request should produce a response")
}

/// Valid initialize params.
pub fn initialize_params() -> Value {
    json!({
        "protocolVersion": "2024-11-05",
        "capabilities": {},
        "clientInfo": { "name": "test-client", "version": "1.0" }
    })
}
