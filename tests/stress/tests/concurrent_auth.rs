//! Concurrent access: many callers hitting the fallback scan at once.
//!
//! Tests verify that the scan budget and rate limiter admit exactly their
//! configured counts under concurrency, and that unrelated requests are not
//! serialized behind scans.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::Barrier;

use wayfarer_mcp::auth::Gatekeeper;
use wayfarer_mcp::config::{AuthConfig, ServerConfig};
use wayfarer_mcp::protocol::ProtocolHandler;
use wayfarer_mcp::storage::MemoryStorage;
use wayfarer_mcp::types::{
    mcp_error_codes, JsonRpcMessage, JsonRpcRequest, McpError, RequestId,
};

// ─── Helpers ───────────────────────────────────────────────────────────────

async fn key_storage() -> Arc<MemoryStorage> {
    Arc::new(
        MemoryStorage::seeded([
            ("auth:key:carol".to_string(), "carol-key-789".to_string()),
        ])
        .await,
    )
}

fn scan_only_config(budget: u64, rate_limit: u64) -> AuthConfig {
    AuthConfig {
        require_auth: true,
        admin_key: Some("admin-secret".to_string()),
        enable_key_index: false,
        enable_fallback_scan: true,
        fallback_scan_rate_limit: rate_limit,
        fallback_scan_budget: budget,
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────

/// Budget N with N+1 simultaneous attempts: exactly N scans happen, at
/// least one caller is rate-limited, and the budget never goes negative.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_attempts_cannot_exceed_budget() {
    const BUDGET: u64 = 3;
    const ATTEMPTS: usize = BUDGET as usize + 1;

    let storage = key_storage().await;
    let gatekeeper = Arc::new(Gatekeeper::new(
        scan_only_config(BUDGET, 100),
        storage.clone(),
    ));
    let barrier = Arc::new(Barrier::new(ATTEMPTS));

    let mut handles = vec![];
    for _ in 0..ATTEMPTS {
        let gatekeeper = gatekeeper.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await; // Synchronize start
            gatekeeper.authenticate(Some("not-a-registered-key")).await
        }));
    }

    let mut scanned_failures = 0;
    let mut rate_limited = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Err(McpError::AuthFailed) => scanned_failures += 1,
            Err(McpError::RateLimited) => rate_limited += 1,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    assert_eq!(scanned_failures, BUDGET);
    assert_eq!(rate_limited, 1);
    assert_eq!(gatekeeper.scan_count(), BUDGET);
    assert_eq!(gatekeeper.budget_remaining(), 0);

    // Exhausted for the rest of the process lifetime: even a registered key
    // cannot be admitted to scan anymore.
    let err = gatekeeper
        .authenticate(Some("carol-key-789"))
        .await
        .unwrap_err();
    assert!(matches!(err, McpError::RateLimited));
}

/// The window rate limit binds independently of the lifetime budget.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_attempts_cannot_exceed_rate_limit() {
    const RATE_LIMIT: u64 = 2;
    const ATTEMPTS: usize = 6;

    let storage = key_storage().await;
    let gatekeeper = Arc::new(Gatekeeper::new(
        scan_only_config(1000, RATE_LIMIT),
        storage,
    ));
    let barrier = Arc::new(Barrier::new(ATTEMPTS));

    let mut handles = vec![];
    for _ in 0..ATTEMPTS {
        let gatekeeper = gatekeeper.clone();
        let barrier = barrier.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            gatekeeper.authenticate(Some("not-a-registered-key")).await
        }));
    }

    let mut rate_limited = 0;
    for handle in handles {
        if matches!(handle.await.unwrap(), Err(McpError::RateLimited)) {
            rate_limited += 1;
        }
    }

    assert_eq!(rate_limited as u64, ATTEMPTS as u64 - RATE_LIMIT);
    assert_eq!(gatekeeper.scan_count(), RATE_LIMIT);
    // Only admitted scans consumed lifetime budget.
    assert_eq!(gatekeeper.budget_remaining(), 1000 - RATE_LIMIT);
}

/// Admin-key calls proceed concurrently while scans are being admitted and
/// never touch storage themselves.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn admin_calls_unaffected_by_concurrent_scans() {
    let storage = key_storage().await;
    let config = ServerConfig {
        auth: scan_only_config(50, 50),
        log_level: None,
        data_file: None,
    };
    let handler = Arc::new(ProtocolHandler::new(config, storage.clone()).unwrap());
    let barrier = Arc::new(Barrier::new(20));

    let mut handles = vec![];
    for i in 0..20i64 {
        let handler = handler.clone();
        let barrier = barrier.clone();
        // Even callers use the admin key, odd callers force a scan.
        let key = if i % 2 == 0 { "admin-secret" } else { "bogus" };
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            let request = JsonRpcMessage::Request(JsonRpcRequest {
                jsonrpc: "2.0".to_string(),
                id: RequestId::Number(i),
                method: "tools/list".to_string(),
                params: Some(json!({"_meta": {"apiKey": key}})),
            });
            handler.handle_message(request).await.unwrap()
        }));
    }

    let mut admin_ok = 0;
    for handle in handles {
        let response = handle.await.unwrap();
        if response["result"]["tools"].is_array() {
            admin_ok += 1;
        } else {
            assert_eq!(response["error"]["code"], mcp_error_codes::AUTH_FAILED);
        }
    }
    assert_eq!(admin_ok, 10);
    assert_eq!(handler.gatekeeper().scan_count(), 10);
}
