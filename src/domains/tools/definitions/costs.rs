//! Cost document tools.
//!
//! Read-only access to cost documents: list with a date range and fetch by
//! identifier. Cost responses are returned without monetary conversion,
//! mirroring the observed behavior of the remote service for this resource.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{FilterBuilder, client_route, list_pairs, payload_result};
use crate::api::{ApiClient, QueryPairs};
use crate::domains::tools::ToolError;
use crate::domains::tools::validate::{
    ValidationResult, require_date, require_numeric_id, validate_pagination,
};

// ============================================================================
// list_costs
// ============================================================================

/// Parameters for listing cost documents.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCostsParams {
    /// Inclusive start of the issue-date range (YYYY-MM-DD).
    #[schemars(description = "Issue date range start, YYYY-MM-DD (inclusive)")]
    pub issue_date_from: Option<String>,

    /// Inclusive end of the issue-date range (YYYY-MM-DD).
    #[schemars(description = "Issue date range end, YYYY-MM-DD (inclusive)")]
    pub issue_date_to: Option<String>,

    /// Number of records to skip.
    #[schemars(description = "Pagination offset (non-negative)")]
    pub offset: Option<i64>,

    /// Maximum number of records to return (1-100).
    #[schemars(description = "Pagination limit, at most 100")]
    pub limit: Option<i64>,
}

pub struct ListCostsTool;

impl ListCostsTool {
    pub const NAME: &'static str = "list_costs";

    pub const DESCRIPTION: &'static str =
        "List cost documents with an optional issue-date range and pagination.";

    fn build_query(params: &ListCostsParams) -> ValidationResult<QueryPairs> {
        validate_pagination(params.offset, params.limit)?;
        if let Some(date) = &params.issue_date_from {
            require_date(date, "issue_date_from")?;
        }
        if let Some(date) = &params.issue_date_to {
            require_date(date, "issue_date_to")?;
        }
        let mut pairs = FilterBuilder::new()
            .gteq("issue_date", params.issue_date_from.as_deref())
            .lteq("issue_date", params.issue_date_to.as_deref())
            .into_pairs();
        pairs.extend(list_pairs(params.offset, params.limit, None, None));
        Ok(pairs)
    }

    pub async fn execute(
        params: ListCostsParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        let query = Self::build_query(&params)?;
        let result = api.get("/costs.json", &query).await?;
        Ok(payload_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListCostsParams>(),
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
// get_cost
// ============================================================================

/// Parameters for fetching a single cost document.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCostParams {
    /// Identifier of the cost document.
    #[schemars(description = "Cost document identifier")]
    pub cost_id: String,
}

pub struct GetCostTool;

impl GetCostTool {
    pub const NAME: &'static str = "get_cost";

    pub const DESCRIPTION: &'static str = "Fetch a single cost document by identifier.";

    pub async fn execute(
        params: GetCostParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_numeric_id(&params.cost_id, "cost_id")?;
        let path = format!("/costs/{}.json", params.cost_id);
        let result = api.get(&path, &[]).await?;
        Ok(payload_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetCostParams>(),
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
