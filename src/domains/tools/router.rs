//! Tool router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module only chains them
//! together over the shared API client.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::api::ApiClient;

use super::definitions::{
    CreateClientTool, CreateInvoiceTool, CreateProductTool, DeleteClientTool, DeleteInvoiceTool,
    DownloadInvoicePdfTool, GetAccountInfoTool, GetBankAccountsTool, GetClientTool, GetCostTool,
    GetInvoiceTaskStatusTool, GetInvoiceTool, GetProductTool, GetVatRatesTool, ListClientsTool,
    ListCostsTool, ListInvoicesTool, ListProductsTool, MarkInvoicePaidTool, SendInvoiceByEmailTool,
    UpdateClientTool, UpdateInvoiceTool, UpdateProductTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(api: Arc<ApiClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ListInvoicesTool::create_route(api.clone()))
        .with_route(GetInvoiceTool::create_route(api.clone()))
        .with_route(CreateInvoiceTool::create_route(api.clone()))
        .with_route(GetInvoiceTaskStatusTool::create_route(api.clone()))
        .with_route(UpdateInvoiceTool::create_route(api.clone()))
        .with_route(DeleteInvoiceTool::create_route(api.clone()))
        .with_route(DownloadInvoicePdfTool::create_route(api.clone()))
        .with_route(SendInvoiceByEmailTool::create_route(api.clone()))
        .with_route(MarkInvoicePaidTool::create_route(api.clone()))
        .with_route(ListClientsTool::create_route(api.clone()))
        .with_route(GetClientTool::create_route(api.clone()))
        .with_route(CreateClientTool::create_route(api.clone()))
        .with_route(UpdateClientTool::create_route(api.clone()))
        .with_route(DeleteClientTool::create_route(api.clone()))
        .with_route(ListProductsTool::create_route(api.clone()))
        .with_route(GetProductTool::create_route(api.clone()))
        .with_route(CreateProductTool::create_route(api.clone()))
        .with_route(UpdateProductTool::create_route(api.clone()))
        .with_route(ListCostsTool::create_route(api.clone()))
        .with_route(GetCostTool::create_route(api.clone()))
        .with_route(GetVatRatesTool::create_route(api.clone()))
        .with_route(GetBankAccountsTool::create_route(api.clone()))
        .with_route(GetAccountInfoTool::create_route(api))
}
