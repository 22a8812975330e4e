//! Invoice tools.
//!
//! Covers listing, retrieval, asynchronous creation, update, deletion, PDF
//! download, email delivery, and payment marking. Invoice creation is
//! asynchronous on the remote side: the immediate result is a task
//! reference which `get_invoice_task_status` polls; the caller retries the
//! status call until it is terminal, this server runs no polling loop.
//!
//! Monetary fields in responses are converted from grosze to zloty; prices
//! in outbound bodies are passed through as supplied (grosze).

use std::sync::Arc;

use base64::Engine;
use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::info;

use super::common::{
    FilterBuilder, client_route, converted_result, list_pairs, payload_result, text_result,
};
use crate::api::{ApiClient, QueryPairs};
use crate::domains::tools::ToolError;
use crate::domains::tools::validate::{
    ServiceInput, ValidationResult, require_date, require_non_empty, require_one_of,
    require_present, require_token, require_uuid, sanitize, validate_pagination,
    validate_services,
};

/// Payment methods accepted by the API.
pub const PAYMENT_METHODS: &[&str] = &[
    "transfer", "cash", "card", "barter", "check", "dotpay", "payu", "paypal", "other",
];

/// Invoice statuses accepted by the API.
pub const INVOICE_STATUSES: &[&str] = &["draft", "sent", "printed", "paid"];

// ============================================================================
// list_invoices
// ============================================================================

/// Parameters for listing invoices.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListInvoicesParams {
    /// Exact invoice number to match.
    #[schemars(description = "Exact invoice number, e.g. '1/2024'")]
    pub number: Option<String>,

    /// Invoice status filter: draft, sent, printed, or paid.
    #[schemars(description = "Status filter: draft, sent, printed, or paid")]
    pub status: Option<String>,

    /// Exact client identifier.
    #[schemars(description = "Client identifier to filter by")]
    pub client_id: Option<String>,

    /// Inclusive start of the invoice-date range (YYYY-MM-DD).
    #[schemars(description = "Invoice date range start, YYYY-MM-DD (inclusive)")]
    pub invoice_date_from: Option<String>,

    /// Inclusive end of the invoice-date range (YYYY-MM-DD).
    #[schemars(description = "Invoice date range end, YYYY-MM-DD (inclusive)")]
    pub invoice_date_to: Option<String>,

    /// Number of records to skip.
    #[schemars(description = "Pagination offset (non-negative)")]
    pub offset: Option<i64>,

    /// Maximum number of records to return (1-100).
    #[schemars(description = "Pagination limit, at most 100")]
    pub limit: Option<i64>,

    /// Sort order, e.g. "invoice_date desc".
    #[schemars(description = "Sort order, e.g. 'invoice_date desc'")]
    pub order: Option<String>,

    /// Comma-separated sparse field selection.
    #[schemars(description = "Comma-separated list of fields to return")]
    pub fields: Option<String>,
}

pub struct ListInvoicesTool;

impl ListInvoicesTool {
    pub const NAME: &'static str = "list_invoices";

    pub const DESCRIPTION: &'static str =
        "List invoices with optional filters (number, status, client, date range) and \
         pagination. Amounts in the response are in zloty.";

    fn build_query(params: &ListInvoicesParams) -> ValidationResult<QueryPairs> {
        validate_pagination(params.offset, params.limit)?;
        if let Some(status) = &params.status {
            require_one_of(status, INVOICE_STATUSES, "status")?;
        }
        if let Some(date) = &params.invoice_date_from {
            require_date(date, "invoice_date_from")?;
        }
        if let Some(date) = &params.invoice_date_to {
            require_date(date, "invoice_date_to")?;
        }

        let mut pairs = FilterBuilder::new()
            .eq("number", params.number.as_deref())
            .eq("status", params.status.as_deref())
            .eq("client_id", params.client_id.as_deref())
            .gteq("invoice_date", params.invoice_date_from.as_deref())
            .lteq("invoice_date", params.invoice_date_to.as_deref())
            .into_pairs();
        pairs.extend(list_pairs(
            params.offset,
            params.limit,
            params.order.as_deref(),
            params.fields.as_deref(),
        ));
        Ok(pairs)
    }

    pub async fn execute(
        params: ListInvoicesParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        let query = Self::build_query(&params)?;
        let result = api.get("/invoices.json", &query).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListInvoicesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(api: Arc<ApiClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        client_route(Self::to_tool(), api, Self::execute)
    }
}

// ============================================================================
// get_invoice
// ============================================================================

/// Parameters for fetching a single invoice.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetInvoiceParams {
    /// UUID of the invoice.
    #[schemars(description = "Invoice UUID")]
    pub invoice_uuid: String,
}

pub struct GetInvoiceTool;

impl GetInvoiceTool {
    pub const NAME: &'static str = "get_invoice";

    pub const DESCRIPTION: &'static str =
        "Fetch a single invoice by UUID. Amounts in the response are in zloty.";

    pub async fn execute(
        params: GetInvoiceParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_uuid(&params.invoice_uuid, "invoice_uuid")?;
        let path = format!("/invoices/{}.json", params.invoice_uuid);
        let result = api.get(&path, &[]).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetInvoiceParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(api: Arc<ApiClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        client_route(Self::to_tool(), api, Self::execute)
    }
}

// ============================================================================
// create_invoice
// ============================================================================

/// Parameters for creating an invoice.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateInvoiceParams {
    /// Company name of the invoiced client.
    #[schemars(description = "Client company name")]
    pub client_company_name: String,

    /// Payment method, one of the fixed allowed set.
    #[schemars(
        description = "Payment method: transfer, cash, card, barter, check, dotpay, payu, paypal, or other"
    )]
    pub payment_method: String,

    /// Invoice line items. Prices are in grosze.
    #[schemars(description = "Line items; each needs a name, tax_symbol, and at least one price (in grosze)")]
    pub services: Vec<ServiceInput>,

    /// Initial status: draft, sent, printed, or paid.
    #[schemars(description = "Initial status: draft, sent, printed, or paid")]
    pub status: Option<String>,

    /// Payment date, required when status is "paid" (YYYY-MM-DD).
    #[schemars(description = "Payment date, YYYY-MM-DD; required when status is 'paid'")]
    pub paid_date: Option<String>,

    /// Issue date (YYYY-MM-DD).
    #[schemars(description = "Invoice issue date, YYYY-MM-DD")]
    pub invoice_date: Option<String>,

    /// Sale date (YYYY-MM-DD).
    #[schemars(description = "Sale date, YYYY-MM-DD")]
    pub sale_date: Option<String>,
}

pub struct CreateInvoiceTool;

impl CreateInvoiceTool {
    pub const NAME: &'static str = "create_invoice";

    pub const DESCRIPTION: &'static str =
        "Create an invoice. Creation is asynchronous: the response carries a task \
         reference, not the finished invoice. Poll get_invoice_task_status with the \
         reference until it is terminal. Prices are given in grosze.";

    fn build_body(params: &CreateInvoiceParams) -> Result<Value, ToolError> {
        require_non_empty(&params.client_company_name, "client_company_name")?;
        require_one_of(&params.payment_method, PAYMENT_METHODS, "payment_method")?;
        validate_services(&params.services, "services")?;
        if let Some(status) = &params.status {
            require_one_of(status, INVOICE_STATUSES, "status")?;
            if status == "paid" {
                let paid_date = require_present(&params.paid_date, "paid_date")?;
                require_date(paid_date, "paid_date")?;
            }
        }
        for (field, date) in [
            ("invoice_date", &params.invoice_date),
            ("sale_date", &params.sale_date),
        ] {
            if let Some(date) = date {
                require_date(date, field)?;
            }
        }

        let mut invoice = Map::new();
        invoice.insert(
            "client_company_name".to_string(),
            json!(params.client_company_name),
        );
        invoice.insert("payment_method".to_string(), json!(params.payment_method));
        invoice.insert(
            "services".to_string(),
            serde_json::to_value(&params.services)
                .map_err(|e| ToolError::internal(e.to_string()))?,
        );
        invoice.insert("status".to_string(), json!(params.status));
        invoice.insert("paid_date".to_string(), json!(params.paid_date));
        invoice.insert("invoice_date".to_string(), json!(params.invoice_date));
        invoice.insert("sale_date".to_string(), json!(params.sale_date));

        Ok(json!({ "invoice": Value::Object(sanitize(invoice)) }))
    }

    pub async fn execute(
        params: CreateInvoiceParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        let body = Self::build_body(&params)?;
        info!(client = %params.client_company_name, "creating invoice");
        let result = api.post("/async/invoices.json", Some(&body)).await?;
        Ok(payload_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CreateInvoiceParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(api: Arc<ApiClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        client_route(Self::to_tool(), api, Self::execute)
    }
}

// ============================================================================
// get_invoice_task_status
// ============================================================================

/// Parameters for polling an invoice creation task.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetInvoiceTaskStatusParams {
    /// Task reference returned by create_invoice.
    #[schemars(description = "Task reference returned by create_invoice")]
    pub task_reference: String,
}

pub struct GetInvoiceTaskStatusTool;

impl GetInvoiceTaskStatusTool {
    pub const NAME: &'static str = "get_invoice_task_status";

    pub const DESCRIPTION: &'static str =
        "Check the status of an asynchronous invoice creation task. Call repeatedly \
         until the status is terminal; the finished invoice appears in the response.";

    pub async fn execute(
        params: GetInvoiceTaskStatusParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_token(&params.task_reference, "task_reference")?;
        let path = format!("/async/invoices/status/{}.json", params.task_reference);
        let result = api.get(&path, &[]).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetInvoiceTaskStatusParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(api: Arc<ApiClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        client_route(Self::to_tool(), api, Self::execute)
    }
}

// ============================================================================
// update_invoice
// ============================================================================

/// Parameters for updating an invoice.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateInvoiceParams {
    /// UUID of the invoice to update.
    #[schemars(description = "Invoice UUID")]
    pub invoice_uuid: String,

    /// New client company name.
    #[schemars(description = "Client company name")]
    pub client_company_name: Option<String>,

    /// New payment method.
    #[schemars(description = "Payment method")]
    pub payment_method: Option<String>,

    /// New status.
    #[schemars(description = "Status: draft, sent, printed, or paid")]
    pub status: Option<String>,

    /// New payment date (YYYY-MM-DD).
    #[schemars(description = "Payment date, YYYY-MM-DD")]
    pub paid_date: Option<String>,

    /// Replacement line items. Prices in grosze.
    #[schemars(description = "Replacement line items (prices in grosze)")]
    pub services: Option<Vec<ServiceInput>>,
}

pub struct UpdateInvoiceTool;

impl UpdateInvoiceTool {
    pub const NAME: &'static str = "update_invoice";

    pub const DESCRIPTION: &'static str =
        "Update fields of an existing invoice by UUID. Only the supplied fields are sent.";

    fn build_body(params: &UpdateInvoiceParams) -> Result<Value, ToolError> {
        if let Some(name) = &params.client_company_name {
            require_non_empty(name, "client_company_name")?;
        }
        if let Some(method) = &params.payment_method {
            require_one_of(method, PAYMENT_METHODS, "payment_method")?;
        }
        if let Some(status) = &params.status {
            require_one_of(status, INVOICE_STATUSES, "status")?;
        }
        if let Some(date) = &params.paid_date {
            require_date(date, "paid_date")?;
        }
        if let Some(services) = &params.services {
            validate_services(services, "services")?;
        }

        let mut invoice = Map::new();
        invoice.insert(
            "client_company_name".to_string(),
            json!(params.client_company_name),
        );
        invoice.insert("payment_method".to_string(), json!(params.payment_method));
        invoice.insert("status".to_string(), json!(params.status));
        invoice.insert("paid_date".to_string(), json!(params.paid_date));
        if let Some(services) = &params.services {
            invoice.insert(
                "services".to_string(),
                serde_json::to_value(services).map_err(|e| ToolError::internal(e.to_string()))?,
            );
        }

        let invoice = sanitize(invoice);
        if invoice.is_empty() {
            return Err(ToolError::invalid_arguments(
                "at least one field to update must be provided",
            ));
        }
        Ok(json!({ "invoice": Value::Object(invoice) }))
    }

    pub async fn execute(
        params: UpdateInvoiceParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_uuid(&params.invoice_uuid, "invoice_uuid")?;
        let body = Self::build_body(&params)?;
        let path = format!("/invoices/{}.json", params.invoice_uuid);
        let result = api.put(&path, &body).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UpdateInvoiceParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(api: Arc<ApiClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        client_route(Self::to_tool(), api, Self::execute)
    }
}

// ============================================================================
// delete_invoice
// ============================================================================

/// Parameters for deleting an invoice.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteInvoiceParams {
    /// UUID of the invoice to delete.
    #[schemars(description = "Invoice UUID")]
    pub invoice_uuid: String,
}

pub struct DeleteInvoiceTool;

impl DeleteInvoiceTool {
    pub const NAME: &'static str = "delete_invoice";

    pub const DESCRIPTION: &'static str =
        "Delete an invoice by UUID. This cannot be undone.";

    pub async fn execute(
        params: DeleteInvoiceParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_uuid(&params.invoice_uuid, "invoice_uuid")?;
        let path = format!("/invoices/{}.json", params.invoice_uuid);
        api.delete(&path).await?;
        info!(uuid = %params.invoice_uuid, "invoice deleted");
        Ok(text_result(format!(
            "Invoice {} deleted",
            params.invoice_uuid
        )))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DeleteInvoiceParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(api: Arc<ApiClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        client_route(Self::to_tool(), api, Self::execute)
    }
}

// ============================================================================
// download_invoice_pdf
// ============================================================================

/// Parameters for downloading an invoice PDF.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DownloadInvoicePdfParams {
    /// UUID of the invoice.
    #[schemars(description = "Invoice UUID")]
    pub invoice_uuid: String,
}

pub struct DownloadInvoicePdfTool;

impl DownloadInvoicePdfTool {
    pub const NAME: &'static str = "download_invoice_pdf";

    pub const DESCRIPTION: &'static str =
        "Download the generated PDF for an invoice. Returns a size note and the \
         document as base64 in a second content block.";

    pub async fn execute(
        params: DownloadInvoicePdfParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_uuid(&params.invoice_uuid, "invoice_uuid")?;
        let path = format!("/invoices/{}/pdf", params.invoice_uuid);
        let bytes = api.get_bytes(&path).await?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        info!(uuid = %params.invoice_uuid, size = bytes.len(), "invoice PDF downloaded");
        Ok(CallToolResult::success(vec![
            Content::text(format!(
                "PDF for invoice {} ({} bytes), base64-encoded below",
                params.invoice_uuid,
                bytes.len()
            )),
            Content::text(encoded),
        ]))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DownloadInvoicePdfParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(api: Arc<ApiClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        client_route(Self::to_tool(), api, Self::execute)
    }
}

// ============================================================================
// send_invoice_by_email
// ============================================================================

/// Parameters for emailing an invoice.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendInvoiceByEmailParams {
    /// UUID of the invoice to send.
    #[schemars(description = "Invoice UUID")]
    pub invoice_uuid: String,

    /// Recipient address; the remote side defaults to the client's stored address.
    #[schemars(description = "Recipient email; defaults to the client's stored address")]
    pub recipient: Option<String>,

    /// Email subject.
    #[schemars(description = "Email subject")]
    pub subject: Option<String>,

    /// Email body text.
    #[schemars(description = "Email message body")]
    pub message: Option<String>,
}

pub struct SendInvoiceByEmailTool;

impl SendInvoiceByEmailTool {
    pub const NAME: &'static str = "send_invoice_by_email";

    pub const DESCRIPTION: &'static str =
        "Send an invoice to the client by email. Recipient, subject, and message are \
         all optional; the remote side falls back to stored defaults.";

    fn build_body(params: &SendInvoiceByEmailParams) -> Result<Value, ToolError> {
        if let Some(recipient) = &params.recipient {
            crate::domains::tools::validate::require_email(recipient, "recipient")?;
        }
        let mut body = Map::new();
        body.insert("recipient".to_string(), json!(params.recipient));
        body.insert("subject".to_string(), json!(params.subject));
        body.insert("message".to_string(), json!(params.message));
        Ok(Value::Object(sanitize(body)))
    }

    pub async fn execute(
        params: SendInvoiceByEmailParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_uuid(&params.invoice_uuid, "invoice_uuid")?;
        let body = Self::build_body(&params)?;
        let path = format!("/invoices/{}/deliver-via-email.json", params.invoice_uuid);
        let body = if body.as_object().is_some_and(|m| m.is_empty()) {
            None
        } else {
            Some(body)
        };
        api.post(&path, body.as_ref()).await?;
        Ok(text_result(format!(
            "Invoice {} queued for email delivery",
            params.invoice_uuid
        )))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SendInvoiceByEmailParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(api: Arc<ApiClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        client_route(Self::to_tool(), api, Self::execute)
    }
}

// ============================================================================
// mark_invoice_paid
// ============================================================================

/// Parameters for marking an invoice as paid.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MarkInvoicePaidParams {
    /// UUID of the invoice.
    #[schemars(description = "Invoice UUID")]
    pub invoice_uuid: String,

    /// Date the payment was received (YYYY-MM-DD).
    #[schemars(description = "Payment date, YYYY-MM-DD")]
    pub paid_date: String,
}

pub struct MarkInvoicePaidTool;

impl MarkInvoicePaidTool {
    pub const NAME: &'static str = "mark_invoice_paid";

    pub const DESCRIPTION: &'static str =
        "Mark an invoice as paid on a given date.";

    pub async fn execute(
        params: MarkInvoicePaidParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_uuid(&params.invoice_uuid, "invoice_uuid")?;
        require_date(&params.paid_date, "paid_date")?;
        let path = format!("/invoices/{}/paid.json", params.invoice_uuid);
        let body = json!({ "paid_date": params.paid_date });
        api.post(&path, Some(&body)).await?;
        Ok(text_result(format!(
            "Invoice {} marked as paid on {}",
            params.invoice_uuid, params.paid_date
        )))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<MarkInvoicePaidParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(api: Arc<ApiClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        client_route(Self::to_tool(), api, Self::execute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;
    use crate::domains::tools::validate::TaxSymbol;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn test_client() -> Arc<ApiClient> {
        let config = ApiConfig {
            api_key: "test-api-key".to_string(),
            base_url: "https://api.sandbox-infakt.pl/api/v3".to_string(),
            sandbox: true,
        };
        Arc::new(ApiClient::new(&config).unwrap())
    }

    fn create_params(status: Option<&str>, paid_date: Option<&str>) -> CreateInvoiceParams {
        CreateInvoiceParams {
            client_company_name: "ACME".to_string(),
            payment_method: "transfer".to_string(),
            services: vec![ServiceInput {
                name: "Dev".to_string(),
                tax_symbol: TaxSymbol::Rate(23.0),
                net_price: None,
                unit_net_price: Some(5000.0),
                gross_price: None,
                quantity: None,
            }],
            status: status.map(String::from),
            paid_date: paid_date.map(String::from),
            invoice_date: None,
            sale_date: None,
        }
    }

    #[test]
    fn test_list_invoices_filter_pairs() {
        let params: ListInvoicesParams = serde_json::from_value(json!({
            "status": "paid",
            "invoice_date_from": "2024-01-01",
            "limit": 10
        }))
        .unwrap();
        let pairs = ListInvoicesTool::build_query(&params).unwrap();
        assert!(pairs.contains(&("q[status_eq]".to_string(), "paid".to_string())));
        assert!(pairs.contains(&("q[invoice_date_gteq]".to_string(), "2024-01-01".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
        // No substring or upper-bound filters were requested.
        assert!(!pairs.iter().any(|(k, _)| k.contains("_cont") || k.contains("_lteq")));
    }

    #[test]
    fn test_list_invoices_rejects_bad_status() {
        let params: ListInvoicesParams =
            serde_json::from_value(json!({"status": "overdue"})).unwrap();
        let err = ListInvoicesTool::build_query(&params).unwrap_err();
        assert_eq!(err.field, "status");
        assert!(err.message.contains("draft, sent, printed, paid"));
    }

    #[test]
    fn test_list_invoices_rejects_limit_above_cap() {
        let params: ListInvoicesParams = serde_json::from_value(json!({"limit": 101})).unwrap();
        assert!(ListInvoicesTool::build_query(&params).is_err());
    }

    #[test]
    fn test_create_invoice_body_shape() {
        let body = CreateInvoiceTool::build_body(&create_params(None, None)).unwrap();
        let invoice = &body["invoice"];
        assert_eq!(invoice["client_company_name"], json!("ACME"));
        assert_eq!(invoice["payment_method"], json!("transfer"));
        // Prices go upstream in grosze, unconverted.
        assert_eq!(invoice["services"][0]["unit_net_price"], json!(5000.0));
        // Unset optional fields are sanitized away, not sent as null.
        assert!(invoice.get("status").is_none());
        assert!(invoice.get("paid_date").is_none());
    }

    #[test]
    fn test_create_invoice_paid_requires_paid_date() {
        let err = CreateInvoiceTool::build_body(&create_params(Some("paid"), None)).unwrap_err();
        assert!(err.to_string().contains("paid_date"));

        let ok = CreateInvoiceTool::build_body(&create_params(Some("paid"), Some("2024-06-01")));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_create_invoice_rejects_unknown_payment_method() {
        let mut params = create_params(None, None);
        params.payment_method = "bitcoin".to_string();
        let err = CreateInvoiceTool::build_body(&params).unwrap_err();
        assert!(err.to_string().contains("payment_method"));
        assert!(err.to_string().contains("transfer"));
    }

    #[test]
    fn test_create_invoice_rejects_empty_services() {
        let mut params = create_params(None, None);
        params.services.clear();
        let err = CreateInvoiceTool::build_body(&params).unwrap_err();
        assert!(err.to_string().contains("services"));
    }

    #[test]
    fn test_update_invoice_requires_some_field() {
        let params: UpdateInvoiceParams = serde_json::from_value(json!({
            "invoice_uuid": "5b11f4ce-a62d-471e-81fc-a69a8278c7da"
        }))
        .unwrap();
        assert!(UpdateInvoiceTool::build_body(&params).is_err());
    }

    #[test]
    fn test_update_invoice_partial_body() {
        let params: UpdateInvoiceParams = serde_json::from_value(json!({
            "invoice_uuid": "5b11f4ce-a62d-471e-81fc-a69a8278c7da",
            "status": "sent"
        }))
        .unwrap();
        let body = UpdateInvoiceTool::build_body(&params).unwrap();
        let invoice = body["invoice"].as_object().unwrap();
        assert_eq!(invoice.len(), 1);
        assert_eq!(invoice["status"], json!("sent"));
    }

    #[test]
    fn test_send_email_body_all_optional() {
        let params: SendInvoiceByEmailParams = serde_json::from_value(json!({
            "invoice_uuid": "5b11f4ce-a62d-471e-81fc-a69a8278c7da"
        }))
        .unwrap();
        let body = SendInvoiceByEmailTool::build_body(&params).unwrap();
        assert!(body.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_send_email_rejects_malformed_recipient() {
        let params: SendInvoiceByEmailParams = serde_json::from_value(json!({
            "invoice_uuid": "5b11f4ce-a62d-471e-81fc-a69a8278c7da",
            "recipient": "not-an-email"
        }))
        .unwrap();
        let err = SendInvoiceByEmailTool::build_body(&params).unwrap_err();
        assert!(err.to_string().contains("recipient"));
    }

    #[test]
    fn test_tool_metadata() {
        assert_eq!(ListInvoicesTool::to_tool().name, "list_invoices");
        assert_eq!(CreateInvoiceTool::to_tool().name, "create_invoice");
        assert!(
            CreateInvoiceTool::to_tool()
                .description
                .unwrap()
                .contains("task")
        );
    }

    #[test]
    fn test_task_status_rejects_path_characters() {
        // The reference is interpolated into the URL; separators must fail
        // before any I/O.
        let params: GetInvoiceTaskStatusParams =
            serde_json::from_value(json!({"task_reference": "abc/../def"})).unwrap();
        let err = tokio_test::block_on(GetInvoiceTaskStatusTool::execute(
            params,
            test_client(),
        ))
        .unwrap_err();
        assert!(err.to_string().contains("task_reference"));
    }

    // Integration tests (require network and INFAKT_API_KEY, run with: cargo test -- --ignored)
    #[ignore]
    #[test]
    fn test_list_invoices_live() {
        let config = ApiConfig::from_env().unwrap();
        let api = Arc::new(ApiClient::new(&config).unwrap());
        let params: ListInvoicesParams = serde_json::from_value(json!({"limit": 5})).unwrap();
        let result = tokio_test::block_on(ListInvoicesTool::execute(params, api)).unwrap();
        assert!(!result.is_error.unwrap_or(true), "Expected success but got error");
        assert!(!result.content.is_empty());
    }

    #[ignore]
    #[test]
    fn test_create_invoice_returns_task_reference_live() {
        let config = ApiConfig::from_env().unwrap();
        let api = Arc::new(ApiClient::new(&config).unwrap());
        let params: CreateInvoiceParams = serde_json::from_value(json!({
            "client_company_name": "Test Client Sp. z o.o.",
            "payment_method": "transfer",
            "services": [
                {"name": "Consulting", "tax_symbol": "23", "unit_net_price": 10000}
            ]
        }))
        .unwrap();
        let result = tokio_test::block_on(CreateInvoiceTool::execute(params, api)).unwrap();
        assert!(!result.is_error.unwrap_or(true), "Expected success but got error");
        // The immediate response is a task reference, not a finished invoice.
        if let RawContent::Text(text) = &result.content[0].raw {
            assert!(
                text.text.contains("reference"),
                "Expected a task reference in {}",
                text.text
            );
        }
    }
}
