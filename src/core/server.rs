//! MCP server implementation.
//!
//! The server wires the shared API client into the tool router and
//! implements the MCP protocol surface: tool listing and tool calls.
//!
//! Tools are defined in `domains/tools/definitions/` with one file per
//! resource. The router is built in `domains/tools/router.rs` and verified
//! against the registry at startup, so adding a tool does not require
//! modifying this file.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use tracing::{info, instrument};

use super::config::Config;
use super::error::Error;
use crate::api::ApiClient;
use crate::domains::tools::{ToolRegistry, build_tool_router};

/// The main MCP server handler.
#[derive(Clone)]
pub struct InvoicingServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl InvoicingServer {
    /// Create a new server with the given configuration.
    ///
    /// Builds the HTTP client for the remote API and verifies the router
    /// covers every registered tool.
    pub fn new(config: Config) -> Result<Self, Error> {
        let config = Arc::new(config);
        let api = Arc::new(ApiClient::new(&config.api)?);

        let tool_router = build_tool_router::<Self>(api);
        ToolRegistry::verify_router(&tool_router)?;

        Ok(Self {
            config,
            tool_router,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }
}

impl ServerHandler for InvoicingServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Invoicing MCP server for the inFakt API. Exposes tools for invoices, \
                 clients, products, costs, and account reference data. Monetary amounts \
                 in responses are in major currency units (PLN); prices sent to create \
                 or update tools are in grosze."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if !ToolRegistry::tool_names()
            .iter()
            .any(|name| *name == request.name.as_ref())
        {
            return Err(ToolRegistry::method_not_found(request.name.as_ref()).into_mcp_error());
        }
        info!("Calling tool");
        let ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: crate::core::config::ServerConfig {
                name: "infakt-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            api: crate::core::config::ApiConfig {
                api_key: "test-api-key".to_string(),
                base_url: "https://api.sandbox-infakt.pl/api/v3".to_string(),
                sandbox: true,
            },
            logging: crate::core::config::LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    #[test]
    fn test_server_new_verifies_router() {
        let server = InvoicingServer::new(test_config()).unwrap();
        assert_eq!(server.name(), "infakt-mcp-server");
    }

    #[test]
    fn test_get_info_enables_tools() {
        let server = InvoicingServer::new(test_config()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
    }
}
