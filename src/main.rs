//! MCP Server Entry Point
//!
//! This is the main entry point for the MCP server. It initializes logging,
//! loads configuration, connects to MongoDB and serves the configured
//! transport until the client goes away.

use anyhow::{Context, Result};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use mongodb_mcp_server::core::{Config, McpServer, TransportService, config::LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging first, so configuration warnings are not lost
    init_logging(&LoggingConfig::from_env().level);

    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);

    let target = config.store.redacted_uri();
    run(config)
        .await
        .with_context(|| format!("MongoDB MCP server ({target}) stopped with an error"))
}

/// Connect, serve until the client goes away, then disconnect.
async fn run(config: Config) -> mongodb_mcp_server::Result<()> {
    let server = McpServer::new(config.clone())?;
    server.connect().await?;

    info!("Server initialized");

    let served = TransportService::new(config.transport)
        .run(server.clone())
        .await;

    info!("Server shutting down");

    if let Err(e) = server.disconnect().await {
        error!("{}", e);
    }

    served?;
    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the MCP protocol in STDIO mode.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
