use clap::Parser;
use sitebay_mcp::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(error) = sitebay_mcp::run(cli).await {
        eprintln!("Error starting SiteBay MCP server: {error}");
        std::process::exit(1);
    }
}
