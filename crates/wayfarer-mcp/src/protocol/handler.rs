//! Top-level protocol dispatcher.
//!
//! One request envelope in, at most one response envelope out. Routing is a
//! closed method enum so the table stays exhaustive; the unknown case falls
//! through to method-not-found.

use std::sync::Arc;
use std::sync::RwLock;

use serde_json::Value;

use crate::auth::{Gatekeeper, Principal};
use crate::config::ServerConfig;
use crate::context::CallContext;
use crate::prompts::{default_prompts, PromptRegistry};
use crate::resources::{default_resources, ResourceRegistry};
use crate::storage::Storage;
use crate::tools::{default_tools, ToolRegistry};
use crate::types::{
    extract_api_key, InitializeParams, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest,
    JsonRpcResponse, McpError, McpResult, PromptGetParams, PromptListResult, RequestId,
    ResourceListResult, ResourceReadParams, ServerCapabilities, SetLevelParams, ToolCallParams,
    ToolListResult,
};

use super::negotiation;
use super::validator::{decode_params, validate_envelope};

/// Log levels accepted by logging/setLevel (syslog severities).
const LOG_LEVELS: &[&str] = &[
    "debug",
    "info",
    "notice",
    "warning",
    "error",
    "critical",
    "alert",
    "emergency",
];

/// The closed set of methods this server routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
    PromptsList,
    PromptsGet,
    LoggingSetLevel,
}

impl Method {
    /// Map a method name to its variant; unknown names return `None` and
    /// surface as method-not-found.
    fn parse(name: &str) -> Option<Self> {
        match name {
            "initialize" => Some(Self::Initialize),
            "tools/list" => Some(Self::ToolsList),
            "tools/call" => Some(Self::ToolsCall),
            "resources/list" => Some(Self::ResourcesList),
            "resources/read" => Some(Self::ResourcesRead),
            "prompts/list" => Some(Self::PromptsList),
            "prompts/get" => Some(Self::PromptsGet),
            "logging/setLevel" => Some(Self::LoggingSetLevel),
            _ => None,
        }
    }

    /// Every method except the handshake requires auth when enabled.
    fn requires_auth(self) -> bool {
        !matches!(self, Self::Initialize)
    }
}

/// Dispatches decoded JSON-RPC messages to the negotiator and registries.
pub struct ProtocolHandler {
    require_auth: bool,
    storage: Arc<dyn Storage>,
    gatekeeper: Gatekeeper,
    tools: ToolRegistry,
    resources: ResourceRegistry,
    prompts: PromptRegistry,
    capabilities: ServerCapabilities,
    log_level: RwLock<String>,
}

impl ProtocolHandler {
    /// Build a handler with the default Wayfarer tool/resource/prompt set.
    pub fn new(config: ServerConfig, storage: Arc<dyn Storage>) -> McpResult<Self> {
        let mut tools = ToolRegistry::new();
        for tool in default_tools() {
            tools.register(tool)?;
        }
        let mut resources = ResourceRegistry::new();
        for resource in default_resources() {
            resources.register(resource)?;
        }
        let mut prompts = PromptRegistry::new();
        for prompt in default_prompts() {
            prompts.register(prompt)?;
        }
        Ok(Self::with_registries(
            config, storage, tools, resources, prompts,
        ))
    }

    /// Build a handler around pre-populated registries. Capabilities are
    /// derived here, once, from which registries are non-empty.
    pub fn with_registries(
        config: ServerConfig,
        storage: Arc<dyn Storage>,
        tools: ToolRegistry,
        resources: ResourceRegistry,
        prompts: PromptRegistry,
    ) -> Self {
        let capabilities = ServerCapabilities::from_registries(
            !tools.is_empty(),
            !resources.is_empty(),
            !prompts.is_empty(),
        );
        let gatekeeper = Gatekeeper::new(config.auth.clone(), Arc::clone(&storage));
        Self {
            require_auth: config.auth.require_auth,
            storage,
            gatekeeper,
            tools,
            resources,
            prompts,
            capabilities,
            log_level: RwLock::new("info".to_string()),
        }
    }

    /// The gatekeeper, exposed for its scan and budget counters.
    pub fn gatekeeper(&self) -> &Gatekeeper {
        &self.gatekeeper
    }

    /// The current logging/setLevel value.
    pub fn log_level(&self) -> String {
        self.log_level
            .read()
            .map(|level| level.clone())
            .unwrap_or_else(|_| "info".to_string())
    }

    /// Handle one raw line from the transport. Returns the encoded response
    /// envelope, or `None` when the input was a notification.
    pub async fn handle_raw(&self, raw: &str) -> Option<String> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                let error = McpError::ParseError(e.to_string());
                let response = error.to_json_rpc_error(RequestId::Null);
                return serde_json::to_string(&response).ok();
            }
        };

        let message: JsonRpcMessage = match serde_json::from_value(value.clone()) {
            Ok(message) => message,
            Err(e) => {
                // Envelope decoded as JSON but fits no message shape. Echo
                // the id when one is present.
                let id = value
                    .get("id")
                    .and_then(|id| serde_json::from_value(id.clone()).ok())
                    .unwrap_or(RequestId::Null);
                let error = McpError::InvalidRequest(e.to_string());
                let response = error.to_json_rpc_error(id);
                return serde_json::to_string(&response).ok();
            }
        };

        let response = self.handle_message(message).await?;
        serde_json::to_string(&response).ok()
    }

    /// Handle one decoded message. Requests yield exactly one response
    /// value; notifications and stray responses yield none.
    pub async fn handle_message(&self, message: JsonRpcMessage) -> Option<Value> {
        match message {
            JsonRpcMessage::Request(request) => Some(self.handle_request(request).await),
            JsonRpcMessage::Notification(notification) => {
                self.handle_notification(notification);
                None
            }
            JsonRpcMessage::Response(_) | JsonRpcMessage::Error(_) => {
                tracing::debug!("ignoring unexpected response message from client");
                None
            }
        }
    }

    /// Handle a request end to end, classifying every failure.
    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        let id = request.id.clone();
        match self.dispatch(&request).await {
            Ok(result) => serde_json::to_value(JsonRpcResponse::new(id, result))
                .unwrap_or(Value::Null),
            Err(error) => {
                tracing::debug!(
                    method = %request.method,
                    code = error.code(),
                    "request failed: {error}"
                );
                serde_json::to_value(error.to_json_rpc_error(id)).unwrap_or(Value::Null)
            }
        }
    }

    /// Route a validated request to its handler.
    async fn dispatch(&self, request: &JsonRpcRequest) -> McpResult<Value> {
        validate_envelope(request)?;
        let method = Method::parse(&request.method)
            .ok_or_else(|| McpError::MethodNotFound(request.method.clone()))?;

        let principal = if self.require_auth && method.requires_auth() {
            let key = extract_api_key(request.params.as_ref());
            self.gatekeeper.authenticate(key.as_deref()).await?
        } else {
            Principal::Anonymous
        };
        let ctx = CallContext::new(principal, Arc::clone(&self.storage));

        match method {
            Method::Initialize => {
                let params: InitializeParams = decode_params(request.params.as_ref())?;
                let result = negotiation::handshake(params, &self.capabilities)?;
                to_result_value(&result)
            }
            Method::ToolsList => to_result_value(&ToolListResult {
                tools: self.tools.list(),
            }),
            Method::ToolsCall => {
                let params: ToolCallParams = decode_params(request.params.as_ref())?;
                let result = self.tools.call(&params.name, params.arguments, &ctx).await?;
                to_result_value(&result)
            }
            Method::ResourcesList => to_result_value(&ResourceListResult {
                resources: self.resources.list(),
            }),
            Method::ResourcesRead => {
                let params: ResourceReadParams = decode_params(request.params.as_ref())?;
                let result = self.resources.read(&params.uri, &ctx).await?;
                to_result_value(&result)
            }
            Method::PromptsList => to_result_value(&PromptListResult {
                prompts: self.prompts.list(),
            }),
            Method::PromptsGet => {
                let params: PromptGetParams = decode_params(request.params.as_ref())?;
                let result = self.prompts.get(&params.name, params.arguments, &ctx).await?;
                to_result_value(&result)
            }
            Method::LoggingSetLevel => {
                let params: SetLevelParams = decode_params(request.params.as_ref())?;
                self.set_log_level(&params.level)?;
                Ok(Value::Object(serde_json::Map::new()))
            }
        }
    }

    /// Record the requested log level after validating it.
    fn set_log_level(&self, level: &str) -> McpResult<()> {
        if !LOG_LEVELS.contains(&level) {
            return Err(McpError::InvalidParams(format!("unknown log level: {level}")));
        }
        if let Ok(mut current) = self.log_level.write() {
            *current = level.to_string();
        }
        tracing::info!("log level set to {level}");
        Ok(())
    }

    /// Notifications are acknowledged and discarded; no per-connection state
    /// is kept between calls.
    fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "initialized" | "notifications/initialized" => {
                tracing::debug!("client reports initialization complete");
            }
            other => {
                tracing::debug!("ignoring notification: {other}");
            }
        }
    }
}

/// Serialize a handler result into the response payload.
fn to_result_value(result: &impl serde::Serialize) -> McpResult<Value> {
    serde_json::to_value(result).map_err(|e| McpError::Internal(e.to_string()))
}
