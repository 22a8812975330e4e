//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration from the environment, and runs
//! the server over stdio. The MCP protocol owns stdout, so logs go to
//! stderr.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use infakt_mcp_server::core::{Config, InvoicingServer, StdioTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment; a missing or malformed API key
    // is fatal before any protocol traffic happens.
    let config = Config::from_env()?;

    init_logging(&config.logging.level);

    info!(
        "Starting {} v{} (endpoint: {}, sandbox: {})",
        config.server.name, config.server.version, config.api.base_url, config.api.sandbox
    );

    let server = InvoicingServer::new(config)?;

    info!("Server initialized");

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level, writing to stderr.
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
