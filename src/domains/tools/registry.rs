//! Tool registry - central list of all tools the server exposes.
//!
//! The registry is the single source of truth for tool names and metadata.
//! The router is verified against it at startup so a tool cannot be declared
//! without a route.

use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::Tool;
use tracing::warn;

use crate::core::error::Error;
use crate::domains::tools::ToolError;

use super::definitions::{
    CreateClientTool, CreateInvoiceTool, CreateProductTool, DeleteClientTool, DeleteInvoiceTool,
    DownloadInvoicePdfTool, GetAccountInfoTool, GetBankAccountsTool, GetClientTool, GetCostTool,
    GetInvoiceTaskStatusTool, GetInvoiceTool, GetProductTool, GetVatRatesTool, ListClientsTool,
    ListCostsTool, ListInvoicesTool, ListProductsTool, MarkInvoicePaidTool, SendInvoiceByEmailTool,
    UpdateClientTool, UpdateInvoiceTool, UpdateProductTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Registry of every tool the server exposes.
pub struct ToolRegistry;

impl ToolRegistry {
    /// All tool names, in listing order.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            ListInvoicesTool::NAME,
            GetInvoiceTool::NAME,
            CreateInvoiceTool::NAME,
            GetInvoiceTaskStatusTool::NAME,
            UpdateInvoiceTool::NAME,
            DeleteInvoiceTool::NAME,
            DownloadInvoicePdfTool::NAME,
            SendInvoiceByEmailTool::NAME,
            MarkInvoicePaidTool::NAME,
            ListClientsTool::NAME,
            GetClientTool::NAME,
            CreateClientTool::NAME,
            UpdateClientTool::NAME,
            DeleteClientTool::NAME,
            ListProductsTool::NAME,
            GetProductTool::NAME,
            CreateProductTool::NAME,
            UpdateProductTool::NAME,
            ListCostsTool::NAME,
            GetCostTool::NAME,
            GetVatRatesTool::NAME,
            GetBankAccountsTool::NAME,
            GetAccountInfoTool::NAME,
        ]
    }

    /// All tools as metadata models, in the same order as [`tool_names`].
    ///
    /// [`tool_names`]: ToolRegistry::tool_names
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ListInvoicesTool::to_tool(),
            GetInvoiceTool::to_tool(),
            CreateInvoiceTool::to_tool(),
            GetInvoiceTaskStatusTool::to_tool(),
            UpdateInvoiceTool::to_tool(),
            DeleteInvoiceTool::to_tool(),
            DownloadInvoicePdfTool::to_tool(),
            SendInvoiceByEmailTool::to_tool(),
            MarkInvoicePaidTool::to_tool(),
            ListClientsTool::to_tool(),
            GetClientTool::to_tool(),
            CreateClientTool::to_tool(),
            UpdateClientTool::to_tool(),
            DeleteClientTool::to_tool(),
            ListProductsTool::to_tool(),
            GetProductTool::to_tool(),
            CreateProductTool::to_tool(),
            UpdateProductTool::to_tool(),
            ListCostsTool::to_tool(),
            GetCostTool::to_tool(),
            GetVatRatesTool::to_tool(),
            GetBankAccountsTool::to_tool(),
            GetAccountInfoTool::to_tool(),
        ]
    }

    /// Verify the router covers every registered tool.
    ///
    /// A registered tool without a route is fatal. A route without a registry
    /// entry only warns: calls are gated on the registry, so the route is
    /// dead code until its tool is declared here.
    pub fn verify_router<S>(router: &ToolRouter<S>) -> Result<(), Error>
    where
        S: Send + Sync + 'static,
    {
        let routed: Vec<String> = router
            .list_all()
            .iter()
            .map(|tool| tool.name.to_string())
            .collect();

        for name in Self::tool_names() {
            if !routed.iter().any(|routed| routed == name) {
                return Err(Error::internal(format!(
                    "tool '{name}' is registered but has no route"
                )));
            }
        }
        for name in &routed {
            if !Self::tool_names().iter().any(|known| known == name) {
                warn!(tool = %name, "route exists for a tool missing from the registry");
            }
        }
        Ok(())
    }

    /// Error for a call to a tool this server does not have.
    pub fn method_not_found(name: &str) -> ToolError {
        ToolError::not_found(format!(
            "unknown tool '{}'; available tools: {}",
            name,
            Self::tool_names().join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names.len(), 23);
        assert!(names.contains(&"list_invoices"));
        assert!(names.contains(&"create_invoice"));
        assert!(names.contains(&"download_invoice_pdf"));
        assert!(names.contains(&"mark_invoice_paid"));
        assert!(names.contains(&"list_clients"));
        assert!(names.contains(&"list_products"));
        assert!(names.contains(&"list_costs"));
        assert!(names.contains(&"get_vat_rates"));
        assert!(names.contains(&"get_account_info"));
    }

    #[test]
    fn test_tools_match_names() {
        let names = ToolRegistry::tool_names();
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(names.len(), tools.len());
        for (name, tool) in names.iter().zip(&tools) {
            assert_eq!(*name, tool.name.as_ref());
        }
    }

    #[test]
    fn test_method_not_found_lists_tools() {
        let err = ToolRegistry::method_not_found("frobnicate");
        let message = err.to_string();
        assert!(message.contains("frobnicate"));
        assert!(message.contains("list_invoices"));
        assert!(message.contains("get_account_info"));
    }
}
