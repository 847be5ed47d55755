//! Error taxonomy with protocol-stable JSON-RPC error codes.
//!
//! Every failure that leaves the server is classified here first; no other
//! module builds raw error payloads.

use thiserror::Error;

use super::message::{JsonRpcError, RequestId};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    /// Envelope was not decodable as JSON.
    pub const PARSE_ERROR: i32 = -32700;
    /// Envelope decoded but is structurally invalid.
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method name is well-formed but unknown.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Params fail the method's shape or schema check.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Uncaught failure inside a handler.
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Server-specific error codes, below -32000 per JSON-RPC convention.
pub mod mcp_error_codes {
    /// Auth is enabled and the request supplied no key.
    pub const AUTH_REQUIRED: i32 = -32001;
    /// A key was supplied but is not valid.
    pub const AUTH_FAILED: i32 = -32002;
    /// Fallback key scan budget or rate window exceeded.
    pub const RATE_LIMITED: i32 = -32003;
    /// Named tool is not registered.
    pub const TOOL_NOT_FOUND: i32 = -32004;
    /// Resource URI matched no registered resource.
    pub const RESOURCE_NOT_FOUND: i32 = -32005;
    /// Named prompt is not registered.
    pub const PROMPT_NOT_FOUND: i32 = -32006;
    /// A registered handler ran and failed.
    pub const EXECUTION_FAILED: i32 = -32007;
}

/// All failure kinds the server can report.
#[derive(Debug, Error)]
pub enum McpError {
    /// Request body was not valid JSON.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request decoded but violates the envelope shape.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown method name.
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Parameters failed shape or schema validation.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Unexpected internal failure. The cause is attached as error data,
    /// never exposed in the top-level message.
    #[error("Internal error")]
    Internal(String),

    /// Auth is required and no key was supplied.
    #[error("Authentication required")]
    AuthRequired,

    /// Supplied key is not valid. One fixed message for every rejection
    /// path so the auth configuration shape is not observable.
    #[error("Invalid API key")]
    AuthFailed,

    /// Fallback scan budget or rate window exhausted.
    #[error("Authentication rate limit exceeded, try again later")]
    RateLimited,

    /// Tool name not registered.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Resource URI not registered.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Prompt name not registered.
    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    /// A registered handler failed during execution.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Convenience alias used throughout the server.
pub type McpResult<T> = Result<T, McpError>;

impl McpError {
    /// The protocol-stable numeric code for this error kind.
    pub fn code(&self) -> i32 {
        match self {
            McpError::ParseError(_) => error_codes::PARSE_ERROR,
            McpError::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            McpError::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            McpError::Internal(_) => error_codes::INTERNAL_ERROR,
            McpError::AuthRequired => mcp_error_codes::AUTH_REQUIRED,
            McpError::AuthFailed => mcp_error_codes::AUTH_FAILED,
            McpError::RateLimited => mcp_error_codes::RATE_LIMITED,
            McpError::ToolNotFound(_) => mcp_error_codes::TOOL_NOT_FOUND,
            McpError::ResourceNotFound(_) => mcp_error_codes::RESOURCE_NOT_FOUND,
            McpError::PromptNotFound(_) => mcp_error_codes::PROMPT_NOT_FOUND,
            McpError::ExecutionFailed(_) => mcp_error_codes::EXECUTION_FAILED,
        }
    }

    /// Convert into a JSON-RPC error response echoing the given id.
    ///
    /// Internal errors carry the underlying cause in `data` so the top-level
    /// message stays generic.
    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        match self {
            McpError::Internal(cause) => JsonRpcError::with_data(
                id,
                self.code(),
                self.to_string(),
                serde_json::json!({ "cause": cause }),
            ),
            _ => JsonRpcError::new(id, self.code(), self.to_string()),
        }
    }
}
