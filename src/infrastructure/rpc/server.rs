//! Transport-agnostic MCP method handler.
//!
//! Both transports (stdio lines and HTTP POST) feed decoded requests through
//! [`McpServer::handle`]; the response envelope is identical either way.

use crate::application::registry;
use crate::application::resources;
use crate::application::tools::ToolContext;
use crate::infrastructure::rpc::types::{RpcRequest, RpcResponse};
use serde_json::{Value, json};
use tracing::{debug, error, info};

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2025-06-18";

pub struct McpServer {
    ctx: ToolContext,
}

impl McpServer {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Handle one decoded request. Returns `None` for notifications.
    pub async fn handle(&self, request: RpcRequest) -> Option<RpcResponse> {
        debug!(method = %request.method, "Received JSON-RPC request");

        if request.jsonrpc != "2.0" {
            return Some(RpcResponse::invalid_request(
                "Unsupported jsonrpc version (expected 2.0)",
            ));
        }

        if request.method.starts_with("notifications/") {
            debug!(method = %request.method, "Acknowledged notification");
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id.clone()),
            "ping" => RpcResponse::success(request.id.clone(), json!({})),
            "tools/list" => self.handle_tools_list(request.id.clone()),
            "tools/call" => self.handle_tools_call(&request).await,
            "resources/list" => RpcResponse::success(request.id.clone(), resources::list()),
            "resources/templates/list" => {
                RpcResponse::success(request.id.clone(), resources::templates())
            }
            "resources/read" => self.handle_resources_read(&request).await,
            other => {
                error!(method = other, "Unknown JSON-RPC method");
                RpcResponse::method_not_found(request.id.clone(), other)
            }
        };

        if request.is_notification() {
            return None;
        }
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> RpcResponse {
        info!("Initializing MCP session");
        RpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                    "title": "SiteBay WordPress Hosting"
                },
                "capabilities": {
                    "tools": { "listChanged": false },
                    "resources": { "listChanged": false }
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Option<Value>) -> RpcResponse {
        let tools: Vec<Value> = registry::CATALOGUE
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": registry::input_schema(tool.name),
                })
            })
            .collect();
        RpcResponse::success(id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, request: &RpcRequest) -> RpcResponse {
        let Some(Value::Object(params)) = &request.params else {
            return RpcResponse::invalid_params(
                request.id.clone(),
                "params must be an object with name and arguments",
            );
        };

        let name = match params.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return RpcResponse::invalid_params(
                    request.id.clone(),
                    "params.name must be a non-empty string",
                );
            }
        };

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        info!(tool = name, "Invoking tool");
        match registry::dispatch(&self.ctx, name, &arguments).await {
            Some(output) => {
                let (text, is_error) = match output {
                    Ok(text) => (text, false),
                    Err(text) => {
                        error!(tool = name, failure = %text, "Tool invocation failed");
                        (text, true)
                    }
                };
                RpcResponse::success(
                    request.id.clone(),
                    json!({
                        "content": [{ "type": "text", "text": text }],
                        "isError": is_error
                    }),
                )
            }
            None => RpcResponse::invalid_params(
                request.id.clone(),
                format!("Unknown tool '{name}'"),
            ),
        }
    }

    async fn handle_resources_read(&self, request: &RpcRequest) -> RpcResponse {
        let uri = request
            .params
            .as_ref()
            .and_then(|params| params.get("uri"))
            .and_then(Value::as_str);
        let Some(uri) = uri else {
            return RpcResponse::invalid_params(
                request.id.clone(),
                "params.uri must be a string",
            );
        };

        match resources::read(&self.ctx, uri).await {
            Ok(text) => RpcResponse::success(
                request.id.clone(),
                json!({
                    "contents": [{
                        "uri": uri,
                        "mimeType": "application/json",
                        "text": text
                    }]
                }),
            ),
            Err(message) => {
                error!(uri, failure = %message, "Resource read failed");
                RpcResponse::error(request.id.clone(), -32002, message)
            }
        }
    }
}
