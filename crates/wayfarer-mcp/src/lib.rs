//! Wayfarer MCP Server — travel catalog, recommendations, and trip planning
//! over the Model Context Protocol.
//!
//! Each call is self-contained: the envelope carries its own API key, auth is
//! enforced per request, and no session state survives between calls.

pub mod auth;
pub mod config;
pub mod context;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod storage;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::ServerConfig;
pub use context::CallContext;
pub use protocol::ProtocolHandler;
pub use storage::{MemoryStorage, Storage};
pub use transport::StdioTransport;
