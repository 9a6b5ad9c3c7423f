// Tool catalogue integrity and end-to-end dispatch through the MCP handler.

use serde_json::{Value, json};
use sitebay_mcp::middleware::{RetryPolicy, SoftFallback, ToolGuard};
use sitebay_mcp::registry::{self, CATALOGUE};
use sitebay_mcp::rpc::{McpServer, PROTOCOL_VERSION, RpcRequest};
use sitebay_mcp::tools::ToolContext;
use sitebay_mcp::{Settings, SiteBayClient, TokenAuth};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context_for(api_url: &str) -> ToolContext {
    let auth = TokenAuth::new(Some("a".repeat(25))).expect("token accepted");
    let settings = Settings::default()
        .with_api_url(api_url)
        .with_timeout(Duration::from_secs(5));
    let client = SiteBayClient::new(auth, &settings).expect("client built");
    ToolContext::new(Arc::new(client), ToolGuard::new(RetryPolicy::default()))
}

fn request(method_name: &str, params: Value) -> RpcRequest {
    RpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method_name.to_string(),
        params: Some(params),
        id: Some(json!(1)),
    }
}

#[test]
fn catalogue_names_are_unique_with_descriptions() {
    let mut seen = HashSet::new();
    for tool in CATALOGUE {
        assert!(seen.insert(tool.name), "duplicate tool name {}", tool.name);
        assert!(!tool.description.is_empty(), "{} lacks a description", tool.name);
    }
}

#[test]
fn every_input_schema_is_an_object() {
    for tool in CATALOGUE {
        let schema = registry::input_schema(tool.name);
        assert_eq!(
            schema.get("type").and_then(Value::as_str),
            Some("object"),
            "{} schema is not object-typed",
            tool.name
        );
        assert!(schema.get("properties").is_some());
    }
}

#[test]
fn soft_404_table_matches_the_designated_operations() {
    let empty_list: HashSet<&str> = CATALOGUE
        .iter()
        .filter(|tool| tool.soft_404 == Some(SoftFallback::EmptyList))
        .map(|tool| tool.name)
        .collect();
    let expected: HashSet<&str> = [
        "sitebay_site_events",
        "sitebay_backup_list_commits",
        "sitebay_list_restores",
        "sitebay_external_path_list",
        "sitebay_account_affiliates",
    ]
    .into_iter()
    .collect();
    assert_eq!(empty_list, expected);

    let no_result: Vec<&str> = CATALOGUE
        .iter()
        .filter(|tool| tool.soft_404 == Some(SoftFallback::NoResult))
        .map(|tool| tool.name)
        .collect();
    assert_eq!(no_result, vec!["sitebay_delete_staging"]);
}

#[tokio::test]
async fn unknown_tool_is_not_dispatched() {
    let ctx = context_for("http://127.0.0.1:9");
    let outcome = registry::dispatch(&ctx, "sitebay_nonexistent", &json!({})).await;
    assert!(outcome.is_none());
}

#[tokio::test]
async fn initialize_reports_protocol_and_server_identity() {
    let server = McpServer::new(context_for("http://127.0.0.1:9"));
    let response = server
        .handle(request("initialize", json!({})))
        .await
        .expect("response for request with id");

    let result = response.result.expect("success result");
    assert_eq!(
        result.get("protocolVersion").and_then(Value::as_str),
        Some(PROTOCOL_VERSION)
    );
    assert_eq!(
        result
            .pointer("/serverInfo/name")
            .and_then(Value::as_str),
        Some("sitebay-mcp")
    );
}

#[tokio::test]
async fn tools_list_exposes_the_full_catalogue() {
    let server = McpServer::new(context_for("http://127.0.0.1:9"));
    let response = server
        .handle(request("tools/list", json!({})))
        .await
        .expect("response for request with id");

    let tools = response
        .result
        .and_then(|result| result.get("tools").cloned())
        .and_then(|tools| tools.as_array().cloned())
        .expect("tools array");
    assert_eq!(tools.len(), CATALOGUE.len());
    assert!(tools.iter().all(|tool| tool.get("inputSchema").is_some()));
}

#[tokio::test]
async fn notifications_get_no_reply() {
    let server = McpServer::new(context_for("http://127.0.0.1:9"));
    let notification = RpcRequest {
        jsonrpc: "2.0".to_string(),
        method: "notifications/initialized".to_string(),
        params: None,
        id: None,
    };
    assert!(server.handle(notification).await.is_none());
}

#[tokio::test]
async fn unknown_methods_return_method_not_found() {
    let server = McpServer::new(context_for("http://127.0.0.1:9"));
    let response = server
        .handle(request("sessions/create", json!({})))
        .await
        .expect("response for request with id");
    assert_eq!(response.error.expect("error").code, -32601);
}

#[tokio::test]
async fn calling_an_unknown_tool_is_a_params_error() {
    let server = McpServer::new(context_for("http://127.0.0.1:9"));
    let response = server
        .handle(request(
            "tools/call",
            json!({"name": "sitebay_nonexistent", "arguments": {}}),
        ))
        .await
        .expect("response for request with id");
    assert_eq!(response.error.expect("error").code, -32602);
}

#[tokio::test]
async fn soft_404_tools_render_an_empty_collection_message() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/f/api/v1/site/missing.example.com/event"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&api)
        .await;

    let server = McpServer::new(context_for(&api.uri()));
    let response = server
        .handle(request(
            "tools/call",
            json!({"name": "sitebay_site_events", "arguments": {"fqdn": "missing.example.com"}}),
        ))
        .await
        .expect("response for request with id");

    let result = response.result.expect("tool call succeeded");
    assert_eq!(result.get("isError").and_then(Value::as_bool), Some(false));
    let text = result
        .pointer("/content/0/text")
        .and_then(Value::as_str)
        .expect("text content");
    assert_eq!(text, "No events found for missing.example.com.");
}

#[tokio::test]
async fn unregistered_404_surfaces_as_a_tool_failure_string() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/f/api/v1/site/missing.example.com"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&api)
        .await;

    let server = McpServer::new(context_for(&api.uri()));
    let response = server
        .handle(request(
            "tools/call",
            json!({"name": "sitebay_get_site", "arguments": {"fqdn": "missing.example.com"}}),
        ))
        .await
        .expect("response for request with id");

    let result = response.result.expect("rendered as tool output, not protocol error");
    assert_eq!(result.get("isError").and_then(Value::as_bool), Some(true));
    let text = result
        .pointer("/content/0/text")
        .and_then(Value::as_str)
        .expect("text content");
    assert_eq!(
        text,
        "Upstream API error for sitebay_get_site: Requested resource not found"
    );
}

#[tokio::test]
async fn list_sites_tool_formats_the_stubbed_payload() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/f/api/v1/site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"fqdn": "x.example.com", "active": true}]
        })))
        .mount(&api)
        .await;

    let server = McpServer::new(context_for(&api.uri()));
    let response = server
        .handle(request(
            "tools/call",
            json!({"name": "sitebay_list_sites", "arguments": {}}),
        ))
        .await
        .expect("response for request with id");

    let result = response.result.expect("tool call succeeded");
    assert_eq!(result.get("isError").and_then(Value::as_bool), Some(false));
    let text = result
        .pointer("/content/0/text")
        .and_then(Value::as_str)
        .expect("text content");
    assert!(text.contains("Found 1 site(s)"));
    assert!(text.contains("x.example.com"));
}

#[tokio::test]
async fn missing_required_arguments_are_rendered_as_validation_failures() {
    let server = McpServer::new(context_for("http://127.0.0.1:9"));
    let response = server
        .handle(request(
            "tools/call",
            json!({"name": "sitebay_get_site", "arguments": {}}),
        ))
        .await
        .expect("response for request with id");

    let result = response.result.expect("rendered as tool output");
    assert_eq!(result.get("isError").and_then(Value::as_bool), Some(true));
    let text = result
        .pointer("/content/0/text")
        .and_then(Value::as_str)
        .expect("text content");
    assert!(text.starts_with("Validation Error:"));
}

#[tokio::test]
async fn account_summary_resource_reads_from_stubbed_listings() {
    let api = MockServer::start().await;
    for (endpoint, body) in [
        ("/f/api/v1/site", json!({"results": [{"fqdn": "x.example.com", "status": "live", "region_name": "us-east", "created_at": "2025-06-01T00:00:00Z"}]})),
        ("/f/api/v1/team", json!({"results": [{"name": "core"}]})),
        ("/f/api/v1/region", json!([{"name": "us-east"}])),
        ("/f/api/v1/template", json!({"results": []})),
    ] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&api)
            .await;
    }

    let server = McpServer::new(context_for(&api.uri()));
    let response = server
        .handle(request(
            "resources/read",
            json!({"uri": "sitebay://account/summary"}),
        ))
        .await
        .expect("response for request with id");

    let text = response
        .result
        .expect("read succeeded")
        .pointer("/contents/0/text")
        .and_then(Value::as_str)
        .expect("text content")
        .to_string();
    let summary: Value = serde_json::from_str(&text).expect("summary is JSON");
    assert_eq!(
        summary.pointer("/account_overview/total_sites").and_then(Value::as_u64),
        Some(1)
    );
    assert_eq!(
        summary.pointer("/sites_by_region/us-east").and_then(Value::as_u64),
        Some(1)
    );
}
