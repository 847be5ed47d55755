//! Per-call context handed to registered handlers.

use std::sync::Arc;

use crate::auth::Principal;
use crate::storage::Storage;

/// Everything a handler may need for one call. Created by the dispatcher
/// after auth and discarded once the response is sent.
#[derive(Clone)]
pub struct CallContext {
    /// The authenticated caller identity.
    pub principal: Principal,
    /// Shared storage backend.
    pub storage: Arc<dyn Storage>,
}

impl CallContext {
    /// Build a context for an authenticated call.
    pub fn new(principal: Principal, storage: Arc<dyn Storage>) -> Self {
        Self { principal, storage }
    }
}
