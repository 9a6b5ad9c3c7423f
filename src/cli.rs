use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "sitebay-mcp",
    version,
    about = "MCP server for the SiteBay WordPress hosting platform"
)]
pub struct Cli {
    /// Run over HTTP instead of STDIO (shorthand for --transport http).
    #[arg(long)]
    pub http: bool,

    /// Transport mode; overrides --http and the MCP_TRANSPORT variable.
    #[arg(long, value_enum)]
    pub transport: Option<Transport>,

    /// HTTP host to bind (default 127.0.0.1).
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP port to bind (default 7823).
    #[arg(long)]
    pub port: Option<u16>,

    /// API token; falls back to the SITEBAY_API_TOKEN variable.
    #[arg(long)]
    pub api_token: Option<String>,

    /// API base URL override; falls back to SITEBAY_API_URL.
    #[arg(long)]
    pub api_url: Option<String>,

    /// Request timeout in seconds; falls back to SITEBAY_TIMEOUT_SECS.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    Stdio,
    Http,
}
