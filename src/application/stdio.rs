//! Stdio transport: newline-delimited JSON-RPC on stdin/stdout.
//!
//! Stdout carries protocol frames only; all logging goes to stderr.

use crate::infrastructure::rpc::server::McpServer;
use crate::infrastructure::rpc::types::{RpcRequest, RpcResponse};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

pub async fn run(server: Arc<McpServer>) -> Result<(), StdioError> {
    let stdin = BufReader::new(io::stdin());
    let mut stdout = io::stdout();
    let mut lines = stdin.lines();

    info!("STDIO transport ready");

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<RpcRequest>(trimmed) {
            Ok(request) => {
                if let Some(response) = server.handle(request).await {
                    write_response(&mut stdout, &response).await?;
                }
            }
            Err(source) => {
                warn!(%source, "Received invalid JSON-RPC frame");
                let response = RpcResponse::parse_error(format!("invalid JSON: {source}"));
                write_response(&mut stdout, &response).await?;
            }
        }
    }

    debug!("STDIN closed, leaving STDIO transport");
    stdout.flush().await?;
    Ok(())
}

async fn write_response(
    stdout: &mut io::Stdout,
    response: &RpcResponse,
) -> Result<(), StdioError> {
    let encoded = serde_json::to_string(response)?;
    stdout.write_all(encoded.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
