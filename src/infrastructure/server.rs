//! HTTP transport: JSON-RPC over `POST /mcp`.

use crate::infrastructure::rpc::server::McpServer;
use crate::infrastructure::rpc::types::{RpcRequest, RpcResponse};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind HTTP listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}

pub async fn serve(server: Arc<McpServer>, addr: SocketAddr) -> Result<(), ServerError> {
    info!(%addr, "Binding MCP HTTP server");

    let app = Router::new()
        .route("/mcp", post(handle_mcp))
        .with_state(server);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "MCP HTTP server ready to accept connections");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn handle_mcp(
    State(server): State<Arc<McpServer>>,
    Json(request): Json<RpcRequest>,
) -> Json<RpcResponse> {
    match server.handle(request).await {
        Some(response) => Json(response),
        // Notifications have no reply body; acknowledge with an empty result.
        None => Json(RpcResponse::success(None, Value::Null)),
    }
}

async fn shutdown_signal() {
    if let Err(source) = tokio::signal::ctrl_c().await {
        warn!(%source, "Failed to install ctrl-c handler");
        return;
    }
    info!("Shutdown signal received, draining connections");
}
