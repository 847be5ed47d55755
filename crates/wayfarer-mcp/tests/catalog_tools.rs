//! Domain tool and resource tests over a seeded catalog.

mod common;

use serde_json::{json, Value};

use wayfarer_mcp::protocol::ProtocolHandler;
use wayfarer_mcp::types::{error_codes, mcp_error_codes};

use common::fixtures::{auth_config, call, catalog_storage, server_config};

async fn catalog_handler() -> ProtocolHandler {
    let mut config = auth_config();
    config.require_auth = false;
    ProtocolHandler::new(server_config(config), catalog_storage().await).unwrap()
}

fn parse_tool_json(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("expected text content");
    serde_json::from_str(text).expect("expected JSON in text")
}

#[tokio::test]
async fn catalog_search_returns_everything_unfiltered() {
    let handler = catalog_handler().await;
    let response = call(
        &handler,
        "tools/call",
        Some(json!({"name": "catalog_search", "arguments": {}})),
    )
    .await;
    let body = parse_tool_json(&response);
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn catalog_search_filters_by_category_and_query() {
    let handler = catalog_handler().await;

    let response = call(
        &handler,
        "tools/call",
        Some(json!({"name": "catalog_search", "arguments": {"category": "city"}})),
    )
    .await;
    let body = parse_tool_json(&response);
    assert_eq!(body["count"], 2);

    let response = call(
        &handler,
        "tools/call",
        Some(json!({"name": "catalog_search", "arguments": {"query": "granite"}})),
    )
    .await;
    let body = parse_tool_json(&response);
    assert_eq!(body["count"], 1);
    assert_eq!(body["destinations"][0]["id"], "patagonia");
}

#[tokio::test]
async fn recommend_ranks_by_tag_overlap() {
    let handler = catalog_handler().await;
    let response = call(
        &handler,
        "tools/call",
        Some(json!({
            "name": "recommend",
            "arguments": {"interests": ["history", "food"], "limit": 2}
        })),
    )
    .await;
    let body = parse_tool_json(&response);
    assert_eq!(body["count"], 2);
    // Kyoto and Lisbon both match twice; Kyoto's higher rating breaks the tie.
    assert_eq!(body["recommendations"][0]["destination"]["id"], "kyoto");
    assert_eq!(body["recommendations"][1]["destination"]["id"], "lisbon");
}

#[tokio::test]
async fn recommend_requires_interests() {
    let handler = catalog_handler().await;
    let response = call(
        &handler,
        "tools/call",
        Some(json!({"name": "recommend", "arguments": {}})),
    )
    .await;
    assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
}

#[tokio::test]
async fn plan_trip_spreads_stops_over_days() {
    let handler = catalog_handler().await;
    let response = call(
        &handler,
        "tools/call",
        Some(json!({
            "name": "plan_trip",
            "arguments": {"destination_ids": ["lisbon", "kyoto", "patagonia"], "days": 2}
        })),
    )
    .await;
    let body = parse_tool_json(&response);
    assert_eq!(body["days"], 2);
    assert_eq!(body["itinerary"][0]["stops"].as_array().unwrap().len(), 2);
    assert_eq!(body["itinerary"][1]["stops"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn plan_trip_rejects_oversized_day_count() {
    let handler = catalog_handler().await;
    // A day count this large would allocate one vec per day; it must be
    // turned away as invalid params before any allocation happens.
    let response = call(
        &handler,
        "tools/call",
        Some(json!({
            "name": "plan_trip",
            "arguments": {"destination_ids": ["lisbon"], "days": 10_000_000}
        })),
    )
    .await;
    assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);

    // The documented ceiling itself is still accepted.
    let response = call(
        &handler,
        "tools/call",
        Some(json!({
            "name": "plan_trip",
            "arguments": {"destination_ids": ["lisbon"], "days": 365}
        })),
    )
    .await;
    let body = parse_tool_json(&response);
    assert_eq!(body["days"], 365);
}

#[tokio::test]
async fn plan_trip_bound_holds_without_schema_validation() {
    use wayfarer_mcp::auth::Principal;
    use wayfarer_mcp::context::CallContext;
    use wayfarer_mcp::tools::{plan_trip::PlanTrip, ToolHandler};
    use wayfarer_mcp::types::McpError;

    // Invoke the handler directly, bypassing the registry's schema check;
    // the in-handler u64 bound must still reject before allocating.
    let ctx = CallContext::new(Principal::Anonymous, catalog_storage().await);
    let err = PlanTrip
        .invoke(
            json!({"destination_ids": ["lisbon"], "days": u64::MAX}),
            &ctx,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, McpError::InvalidParams(_)));
    assert_eq!(err.code(), error_codes::INVALID_PARAMS);
}

#[tokio::test]
async fn plan_trip_unknown_id_is_execution_failure() {
    let handler = catalog_handler().await;
    let response = call(
        &handler,
        "tools/call",
        Some(json!({
            "name": "plan_trip",
            "arguments": {"destination_ids": ["atlantis"], "days": 1}
        })),
    )
    .await;
    assert_eq!(response["error"]["code"], mcp_error_codes::EXECUTION_FAILED);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("atlantis"));
}

#[tokio::test]
async fn catalog_resource_serves_all_destinations() {
    let handler = catalog_handler().await;
    let response = call(
        &handler,
        "resources/read",
        Some(json!({"uri": "wayfarer://catalog"})),
    )
    .await;
    let text = response["result"]["contents"][0]["text"].as_str().unwrap();
    let body: Value = serde_json::from_str(text).unwrap();
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn destination_resource_serves_one_entry() {
    let handler = catalog_handler().await;
    let response = call(
        &handler,
        "resources/read",
        Some(json!({"uri": "wayfarer://destination/kyoto"})),
    )
    .await;
    let text = response["result"]["contents"][0]["text"].as_str().unwrap();
    let body: Value = serde_json::from_str(text).unwrap();
    assert_eq!(body["name"], "Kyoto");

    let response = call(
        &handler,
        "resources/read",
        Some(json!({"uri": "wayfarer://destination/nowhere"})),
    )
    .await;
    assert_eq!(
        response["error"]["code"],
        mcp_error_codes::RESOURCE_NOT_FOUND
    );
}

#[tokio::test]
async fn prompts_list_and_get() {
    let handler = catalog_handler().await;
    let response = call(&handler, "prompts/list", None).await;
    let prompts = response["result"]["prompts"].as_array().unwrap();
    let names: Vec<&str> = prompts.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["discover", "plan"]);

    let response = call(
        &handler,
        "prompts/get",
        Some(json!({"name": "discover", "arguments": {"interests": "hiking"}})),
    )
    .await;
    let messages = response["result"]["messages"].as_array().unwrap();
    assert_eq!(messages[0]["role"], "user");
    assert!(messages[0]["content"]["text"]
        .as_str()
        .unwrap()
        .contains("hiking"));

    let response = call(&handler, "prompts/get", Some(json!({"name": "discover"}))).await;
    assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
}
