//! inFakt MCP Server Library
//!
//! This crate exposes the inFakt invoicing API as a Model Context Protocol
//! (MCP) server so AI agents can manage invoices, clients, products, and
//! costs over stdio.
//!
//! # Architecture
//!
//! - **api**: HTTP client for the inFakt REST API
//! - **core**: Configuration, error handling, the server handler, and the
//!   stdio transport
//! - **domains::tools**: Tool definitions, validation, monetary conversion,
//!   and the registry/router pair
//!
//! # Example
//!
//! ```rust,no_run
//! use infakt_mcp_server::core::{Config, InvoicingServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = InvoicingServer::new(config)?;
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, InvoicingServer, Result};
