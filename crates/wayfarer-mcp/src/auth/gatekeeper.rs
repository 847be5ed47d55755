//! Per-request API key validation.
//!
//! Three paths, tried in order: constant-time admin key compare (no storage
//! read), direct index lookup, then a budget-capped linear scan over the
//! registered-key namespace. The same `AuthFailed` error is returned by
//! every rejecting branch so a caller cannot tell which paths are enabled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::config::AuthConfig;
use crate::storage::Storage;
use crate::types::{McpError, McpResult};

use super::budget::ScanBudget;

/// Storage namespace for the key index: `auth:index:{key}` -> owner.
const INDEX_PREFIX: &str = "auth:index:";

/// Storage namespace for registered keys: `auth:key:{owner}` -> secret.
const KEY_PREFIX: &str = "auth:key:";

/// The authenticated identity attached to a call, discarded after the
/// response is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Auth is disabled; no identity established.
    Anonymous,
    /// The configured admin key was supplied.
    Admin,
    /// A registered key was supplied; carries the key's owner.
    Key(String),
}

/// Validates caller-supplied keys against the configured admin key and the
/// storage-backed key registry.
pub struct Gatekeeper {
    config: AuthConfig,
    storage: Arc<dyn Storage>,
    budget: ScanBudget,
    scans: AtomicU64,
}

impl Gatekeeper {
    /// Build a gatekeeper with a fresh scan budget.
    pub fn new(config: AuthConfig, storage: Arc<dyn Storage>) -> Self {
        let budget = ScanBudget::new(config.fallback_scan_budget, config.fallback_scan_rate_limit);
        Self {
            config,
            storage,
            budget,
            scans: AtomicU64::new(0),
        }
    }

    /// Validate a caller-supplied key.
    pub async fn authenticate(&self, supplied: Option<&str>) -> McpResult<Principal> {
        if !self.config.require_auth {
            return Ok(Principal::Anonymous);
        }
        let supplied = supplied.ok_or(McpError::AuthRequired)?;

        if let Some(admin) = &self.config.admin_key {
            if constant_time_eq(supplied, admin) {
                return Ok(Principal::Admin);
            }
        }

        if self.config.enable_key_index {
            let index_key = format!("{INDEX_PREFIX}{supplied}");
            match self.storage.get(&index_key).await {
                Ok(Some(owner)) => return Ok(Principal::Key(owner)),
                Ok(None) => {
                    if !self.config.enable_fallback_scan {
                        return Err(McpError::AuthFailed);
                    }
                    // Index miss with scanning enabled: fall through.
                }
                Err(e) => {
                    tracing::error!("key index lookup failed: {e}");
                    return Err(McpError::Internal(e.to_string()));
                }
            }
        }

        if self.config.enable_fallback_scan {
            if !self.budget.try_admit() {
                tracing::warn!("fallback key scan rejected by budget or rate limit");
                return Err(McpError::RateLimited);
            }
            return self.scan_for_key(supplied).await;
        }

        Err(McpError::AuthFailed)
    }

    /// Linear scan over the registered-key namespace.
    async fn scan_for_key(&self, supplied: &str) -> McpResult<Principal> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        let keys = self
            .storage
            .list(KEY_PREFIX)
            .await
            .map_err(|e| McpError::Internal(e.to_string()))?;
        for storage_key in keys {
            let Some(secret) = self
                .storage
                .get(&storage_key)
                .await
                .map_err(|e| McpError::Internal(e.to_string()))?
            else {
                continue;
            };
            if constant_time_eq(supplied, &secret) {
                let owner = storage_key
                    .strip_prefix(KEY_PREFIX)
                    .unwrap_or(&storage_key)
                    .to_string();
                return Ok(Principal::Key(owner));
            }
        }
        Err(McpError::AuthFailed)
    }

    /// Number of fallback scans attempted so far.
    pub fn scan_count(&self) -> u64 {
        self.scans.load(Ordering::SeqCst)
    }

    /// Remaining lifetime scan budget.
    pub fn budget_remaining(&self) -> u64 {
        self.budget.remaining()
    }
}

/// Constant-time string equality.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
