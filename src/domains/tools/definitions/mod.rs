//! Tool definitions, grouped by API resource.

pub mod clients;
pub mod common;
pub mod costs;
pub mod invoices;
pub mod products;
pub mod reference;

pub use clients::{
    CreateClientTool, DeleteClientTool, GetClientTool, ListClientsTool, UpdateClientTool,
};
pub use costs::{GetCostTool, ListCostsTool};
pub use invoices::{
    CreateInvoiceTool, DeleteInvoiceTool, DownloadInvoicePdfTool, GetInvoiceTaskStatusTool,
    GetInvoiceTool, ListInvoicesTool, MarkInvoicePaidTool, SendInvoiceByEmailTool,
    UpdateInvoiceTool,
};
pub use products::{CreateProductTool, GetProductTool, ListProductsTool, UpdateProductTool};
pub use reference::{GetAccountInfoTool, GetBankAccountsTool, GetVatRatesTool};
