//! MCP resources: read-only views over the Wayfarer catalog.

pub mod catalog;
pub mod destination;
pub mod registry;

pub use registry::ResourceRegistry;

use async_trait::async_trait;

use crate::context::CallContext;
use crate::types::{McpResult, ReadResourceResult, ResourceDefinition};

/// A registered resource: metadata plus a URI-matched read handler.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// The resource's URI, name, and description.
    fn definition(&self) -> ResourceDefinition;

    /// Whether this handler serves the given URI.
    fn matches(&self, uri: &str) -> bool;

    /// Read the resource contents for a matched URI.
    async fn read(&self, uri: &str, ctx: &CallContext) -> McpResult<ReadResourceResult>;
}

/// Build the default resource set.
pub fn default_resources() -> Vec<Box<dyn ResourceHandler>> {
    vec![
        Box::new(catalog::CatalogResource),
        Box::new(destination::DestinationResource),
    ]
}
