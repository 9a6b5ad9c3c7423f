pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{middleware, registry, resources, stdio, tools};
pub use cli::{Cli, Transport};
pub use config::{ConfigError, Settings};
pub use domain::types;
pub use infrastructure::{ApiBody, ApiError, SiteBayClient, TokenAuth, rpc, server};

use application::middleware::{RetryPolicy, ToolGuard};
use application::tools::ToolContext;
use infrastructure::rpc::McpServer;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing();
    info!("Starting sitebay-mcp");
    debug!(?cli.transport, http = cli.http, "CLI arguments parsed");

    config::ensure_env_loaded();

    let mut settings = Settings::from_env()?;
    if let Some(api_url) = &cli.api_url {
        settings = settings.with_api_url(api_url.clone());
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        settings = settings.with_timeout(Duration::from_secs(timeout_secs));
    }

    // A missing token must fail fast and loudly, before any transport starts.
    let auth = TokenAuth::new(cli.api_token.clone())?;
    if !auth.is_well_formed() {
        warn!("API token looks malformed (shorter than expected); calls may be rejected upstream");
    }

    let client = Arc::new(SiteBayClient::new(auth, &settings)?);
    info!(api_url = %settings.api_url, "SiteBay API client ready");

    // Lightweight warm-up; auth or transport problems surface on first use.
    if let Err(error) = client.list_templates().await {
        debug!(%error, "Warm-up request failed (non-fatal)");
    }

    let ctx = ToolContext::new(client, ToolGuard::new(RetryPolicy::default()));
    let server = Arc::new(McpServer::new(ctx));

    let transport = resolve_transport(&cli);
    info!(?transport, "Running server on selected transport");
    match transport {
        Transport::Stdio => stdio::run(server).await?,
        Transport::Http => {
            let (env_host, env_port) = config::http_bind_from_env()?;
            let host = cli.host.clone().unwrap_or(env_host);
            let port = cli.port.unwrap_or(env_port);
            let addr: SocketAddr = format!("{host}:{port}").parse()?;
            server::serve(server, addr).await?;
        }
    }

    info!("Server execution finished");
    Ok(())
}

fn resolve_transport(cli: &Cli) -> Transport {
    if let Some(transport) = cli.transport {
        return transport;
    }
    if cli.http {
        return Transport::Http;
    }
    match config::transport_from_env().as_deref() {
        Some("http") => Transport::Http,
        _ => Transport::Stdio,
    }
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        // Logs go to stderr; stdout is reserved for the STDIO transport.
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
