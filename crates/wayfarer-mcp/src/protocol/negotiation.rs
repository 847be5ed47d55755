//! MCP capability negotiation during initialization.

use crate::types::{
    Implementation, InitializeParams, InitializeResult, McpError, McpResult, ServerCapabilities,
    MCP_VERSION,
};

/// Process an initialize request.
///
/// The version check is strict: a mismatch fails with the supported version
/// in the error, never a silent upgrade or downgrade. This function is pure
/// — calling it repeatedly yields the same capability descriptor.
pub fn handshake(
    params: InitializeParams,
    capabilities: &ServerCapabilities,
) -> McpResult<InitializeResult> {
    if params.protocol_version != MCP_VERSION {
        return Err(McpError::InvalidParams(format!(
            "unsupported protocol version {}; this server supports {MCP_VERSION}",
            params.protocol_version
        )));
    }

    tracing::info!(
        "initialize from client {} v{}",
        params.client_info.name,
        params.client_info.version
    );

    Ok(InitializeResult {
        protocol_version: MCP_VERSION.to_string(),
        capabilities: capabilities.clone(),
        server_info: Implementation::server(),
        instructions: Some(
            "Wayfarer MCP server provides a travel destination catalog. \
             Use tools to search the catalog, get recommendations, and plan trips. \
             Use resources to browse destinations. \
             Use prompts for guided discovery and planning."
                .to_string(),
        ),
    })
}
