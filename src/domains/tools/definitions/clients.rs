//! Client (contractor) tools.
//!
//! List/get/create/update/delete for the clients resource. Monetary fields
//! in responses (e.g. outstanding amounts) are converted to zloty.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::info;

use super::common::{FilterBuilder, client_route, converted_result, list_pairs, text_result};
use crate::api::{ApiClient, QueryPairs};
use crate::domains::tools::ToolError;
use crate::domains::tools::validate::{
    ValidationResult, require_email, require_non_empty, require_numeric_id, sanitize,
    validate_pagination,
};

// ============================================================================
// list_clients
// ============================================================================

/// Parameters for listing clients.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListClientsParams {
    /// Substring match on the company name.
    #[schemars(description = "Company name fragment to search for")]
    pub name: Option<String>,

    /// Exact tax identifier (NIP).
    #[schemars(description = "Exact NIP (tax identifier)")]
    pub nip: Option<String>,

    /// Exact email address.
    #[schemars(description = "Exact email address")]
    pub email: Option<String>,

    /// Number of records to skip.
    #[schemars(description = "Pagination offset (non-negative)")]
    pub offset: Option<i64>,

    /// Maximum number of records to return (1-100).
    #[schemars(description = "Pagination limit, at most 100")]
    pub limit: Option<i64>,
}

pub struct ListClientsTool;

impl ListClientsTool {
    pub const NAME: &'static str = "list_clients";

    pub const DESCRIPTION: &'static str =
        "List clients with optional filters (name fragment, exact NIP, exact email) \
         and pagination.";

    fn build_query(params: &ListClientsParams) -> ValidationResult<QueryPairs> {
        validate_pagination(params.offset, params.limit)?;
        let mut pairs = FilterBuilder::new()
            .cont("company_name", params.name.as_deref())
            .eq("nip", params.nip.as_deref())
            .eq("email", params.email.as_deref())
            .into_pairs();
        pairs.extend(list_pairs(params.offset, params.limit, None, None));
        Ok(pairs)
    }

    pub async fn execute(
        params: ListClientsParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        let query = Self::build_query(&params)?;
        let result = api.get("/clients.json", &query).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListClientsParams>(),
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
// get_client
// ============================================================================

/// Parameters for fetching a single client.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetClientParams {
    /// Identifier of the client.
    #[schemars(description = "Client identifier")]
    pub client_id: String,
}

pub struct GetClientTool;

impl GetClientTool {
    pub const NAME: &'static str = "get_client";

    pub const DESCRIPTION: &'static str = "Fetch a single client by identifier.";

    pub async fn execute(
        params: GetClientParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_numeric_id(&params.client_id, "client_id")?;
        let path = format!("/clients/{}.json", params.client_id);
        let result = api.get(&path, &[]).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetClientParams>(),
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
// create_client
// ============================================================================

/// Parameters for creating a client.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateClientParams {
    /// Company name of the client.
    #[schemars(description = "Company name")]
    pub company_name: String,

    /// Tax identifier (NIP).
    #[schemars(description = "NIP (tax identifier)")]
    pub nip: Option<String>,

    /// Contact email address.
    #[schemars(description = "Contact email address")]
    pub email: Option<String>,

    /// Street address.
    #[schemars(description = "Street address")]
    pub street: Option<String>,

    /// City.
    #[schemars(description = "City")]
    pub city: Option<String>,

    /// Postal code.
    #[schemars(description = "Postal code")]
    pub postal_code: Option<String>,

    /// Two-letter country code.
    #[schemars(description = "Country code, e.g. 'PL'")]
    pub country: Option<String>,
}

pub struct CreateClientTool;

impl CreateClientTool {
    pub const NAME: &'static str = "create_client";

    pub const DESCRIPTION: &'static str =
        "Create a client. Company name is required; NIP and email are validated when given.";

    fn build_body(params: &CreateClientParams) -> Result<Value, ToolError> {
        require_non_empty(&params.company_name, "company_name")?;
        if let Some(nip) = &params.nip {
            require_non_empty(nip, "nip")?;
        }
        if let Some(email) = &params.email {
            require_email(email, "email")?;
        }

        let mut client = Map::new();
        client.insert("company_name".to_string(), json!(params.company_name));
        client.insert("nip".to_string(), json!(params.nip));
        client.insert("email".to_string(), json!(params.email));
        client.insert("street".to_string(), json!(params.street));
        client.insert("city".to_string(), json!(params.city));
        client.insert("postal_code".to_string(), json!(params.postal_code));
        client.insert("country".to_string(), json!(params.country));
        Ok(json!({ "client": Value::Object(sanitize(client)) }))
    }

    pub async fn execute(
        params: CreateClientParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        let body = Self::build_body(&params)?;
        info!(company = %params.company_name, "creating client");
        let result = api.post("/clients.json", Some(&body)).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CreateClientParams>(),
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
// update_client
// ============================================================================

/// Parameters for updating a client.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateClientParams {
    /// Identifier of the client to update.
    #[schemars(description = "Client identifier")]
    pub client_id: String,

    /// New company name.
    #[schemars(description = "Company name")]
    pub company_name: Option<String>,

    /// New tax identifier.
    #[schemars(description = "NIP (tax identifier)")]
    pub nip: Option<String>,

    /// New contact email.
    #[schemars(description = "Contact email address")]
    pub email: Option<String>,

    /// New street address.
    #[schemars(description = "Street address")]
    pub street: Option<String>,

    /// New city.
    #[schemars(description = "City")]
    pub city: Option<String>,

    /// New postal code.
    #[schemars(description = "Postal code")]
    pub postal_code: Option<String>,
}

pub struct UpdateClientTool;

impl UpdateClientTool {
    pub const NAME: &'static str = "update_client";

    pub const DESCRIPTION: &'static str =
        "Update fields of an existing client. Only the supplied fields are sent.";

    fn build_body(params: &UpdateClientParams) -> Result<Value, ToolError> {
        if let Some(name) = &params.company_name {
            require_non_empty(name, "company_name")?;
        }
        if let Some(email) = &params.email {
            require_email(email, "email")?;
        }

        let mut client = Map::new();
        client.insert("company_name".to_string(), json!(params.company_name));
        client.insert("nip".to_string(), json!(params.nip));
        client.insert("email".to_string(), json!(params.email));
        client.insert("street".to_string(), json!(params.street));
        client.insert("city".to_string(), json!(params.city));
        client.insert("postal_code".to_string(), json!(params.postal_code));

        let client = sanitize(client);
        if client.is_empty() {
            return Err(ToolError::invalid_arguments(
                "at least one field to update must be provided",
            ));
        }
        Ok(json!({ "client": Value::Object(client) }))
    }

    pub async fn execute(
        params: UpdateClientParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_numeric_id(&params.client_id, "client_id")?;
        let body = Self::build_body(&params)?;
        let path = format!("/clients/{}.json", params.client_id);
        let result = api.put(&path, &body).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UpdateClientParams>(),
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
// delete_client
// ============================================================================

/// Parameters for deleting a client.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteClientParams {
    /// Identifier of the client to delete.
    #[schemars(description = "Client identifier")]
    pub client_id: String,
}

pub struct DeleteClientTool;

impl DeleteClientTool {
    pub const NAME: &'static str = "delete_client";

    pub const DESCRIPTION: &'static str = "Delete a client. This cannot be undone.";

    pub async fn execute(
        params: DeleteClientParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_numeric_id(&params.client_id, "client_id")?;
        let path = format!("/clients/{}.json", params.client_id);
        api.delete(&path).await?;
        info!(id = %params.client_id, "client deleted");
        Ok(text_result(format!("Client {} deleted", params.client_id)))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DeleteClientParams>(),
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
