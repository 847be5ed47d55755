//! Envelope shape checks and typed parameter decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{JsonRpcRequest, McpError, McpResult, JSONRPC_VERSION};

/// Check the envelope invariants of a decoded request.
pub fn validate_envelope(request: &JsonRpcRequest) -> McpResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(McpError::InvalidRequest(format!(
            "jsonrpc must be \"{JSONRPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }
    if request.method.is_empty() {
        return Err(McpError::InvalidRequest("method must not be empty".to_string()));
    }
    Ok(())
}

/// Decode required params into a typed structure.
pub fn decode_params<T: DeserializeOwned>(params: Option<&Value>) -> McpResult<T> {
    let params = params.ok_or_else(|| McpError::InvalidParams("params are required".to_string()))?;
    serde_json::from_value(params.clone())
        .map_err(|e| McpError::InvalidParams(format!("malformed params: {e}")))
}
