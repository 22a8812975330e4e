//! Reference-data tools.
//!
//! Small read-only lookups: VAT rates, the account's bank accounts, and the
//! account profile itself. None of these take parameters.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{client_route, converted_result};
use crate::api::ApiClient;
use crate::domains::tools::ToolError;

/// Empty parameter set for the parameterless reference lookups.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

// ============================================================================
// get_vat_rates
// ============================================================================

pub struct GetVatRatesTool;

impl GetVatRatesTool {
    pub const NAME: &'static str = "get_vat_rates";

    pub const DESCRIPTION: &'static str =
        "List the VAT rates accepted by the service, with their symbols.";

    pub async fn execute(
        _params: NoParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        let result = api.get("/vat_rates.json", &[]).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NoParams>(),
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
// get_bank_accounts
// ============================================================================

pub struct GetBankAccountsTool;

impl GetBankAccountsTool {
    pub const NAME: &'static str = "get_bank_accounts";

    pub const DESCRIPTION: &'static str =
        "List the bank accounts configured on the authenticated account.";

    pub async fn execute(
        _params: NoParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        let result = api.get("/bank_accounts.json", &[]).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NoParams>(),
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
// get_account_info
// ============================================================================

pub struct GetAccountInfoTool;

impl GetAccountInfoTool {
    pub const NAME: &'static str = "get_account_info";

    pub const DESCRIPTION: &'static str =
        "Fetch the profile of the authenticated account (company data, settings).";

    pub async fn execute(
        _params: NoParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        let result = api.get("/account/details.json", &[]).await?;
        Ok(converted_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NoParams>(),
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
    use serde_json::json;

    #[test]
    fn test_no_params_accepts_empty_object() {
        let params: NoParams = serde_json::from_value(json!({})).unwrap();
        let _ = params;
    }

    #[test]
    fn test_tool_metadata() {
        let tool = GetVatRatesTool::to_tool();
        assert_eq!(tool.name, "get_vat_rates");
        assert!(tool.description.is_some());
    }

    // Integration tests (require network and INFAKT_API_KEY, run with: cargo test -- --ignored)
    #[ignore]
    #[test]
    fn test_get_vat_rates_live() {
        let config = crate::core::config::ApiConfig::from_env().unwrap();
        let api = Arc::new(ApiClient::new(&config).unwrap());
        let result =
            tokio_test::block_on(GetVatRatesTool::execute(NoParams {}, api)).unwrap();
        assert!(!result.is_error.unwrap_or(true), "Expected success but got error");
        assert!(!result.content.is_empty());
    }
}
