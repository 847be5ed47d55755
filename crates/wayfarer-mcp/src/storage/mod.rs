//! Key/value storage contract consumed by auth and the domain tools.

pub mod memory;

pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Failure inside a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not complete the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Minimal get/put/list contract over a key/value namespace.
///
/// Backends are assumed eventually consistent: a key is at-least-once
/// readable after a local put completes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// List all keys beginning with `prefix`, in lexicographic order.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}
