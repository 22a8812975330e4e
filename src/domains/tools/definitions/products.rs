//! Product tools.
//!
//! List/get/create/update for the products resource. Product responses are
//! returned without monetary conversion, mirroring the observed behavior of
//! the remote service for this resource.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::{ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::info;

use super::common::{FilterBuilder, client_route, list_pairs, payload_result};
use crate::api::{ApiClient, QueryPairs};
use crate::domains::tools::ToolError;
use crate::domains::tools::validate::{
    TaxSymbol, ValidationResult, require_non_empty, require_non_negative, require_numeric_id,
    require_positive, sanitize, validate_pagination,
};

// ============================================================================
// list_products
// ============================================================================

/// Parameters for listing products.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListProductsParams {
    /// Substring match on the product name.
    #[schemars(description = "Product name fragment to search for")]
    pub name: Option<String>,

    /// Number of records to skip.
    #[schemars(description = "Pagination offset (non-negative)")]
    pub offset: Option<i64>,

    /// Maximum number of records to return (1-100).
    #[schemars(description = "Pagination limit, at most 100")]
    pub limit: Option<i64>,
}

pub struct ListProductsTool;

impl ListProductsTool {
    pub const NAME: &'static str = "list_products";

    pub const DESCRIPTION: &'static str =
        "List products with an optional name filter and pagination.";

    fn build_query(params: &ListProductsParams) -> ValidationResult<QueryPairs> {
        validate_pagination(params.offset, params.limit)?;
        let mut pairs = FilterBuilder::new()
            .cont("name", params.name.as_deref())
            .into_pairs();
        pairs.extend(list_pairs(params.offset, params.limit, None, None));
        Ok(pairs)
    }

    pub async fn execute(
        params: ListProductsParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        let query = Self::build_query(&params)?;
        let result = api.get("/products.json", &query).await?;
        Ok(payload_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListProductsParams>(),
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
// get_product
// ============================================================================

/// Parameters for fetching a single product.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProductParams {
    /// Identifier of the product.
    #[schemars(description = "Product identifier")]
    pub product_id: String,
}

pub struct GetProductTool;

impl GetProductTool {
    pub const NAME: &'static str = "get_product";

    pub const DESCRIPTION: &'static str = "Fetch a single product by identifier.";

    pub async fn execute(
        params: GetProductParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_numeric_id(&params.product_id, "product_id")?;
        let path = format!("/products/{}.json", params.product_id);
        let result = api.get(&path, &[]).await?;
        Ok(payload_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetProductParams>(),
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
// create_product
// ============================================================================

/// Parameters for creating a product.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateProductParams {
    /// Product name.
    #[schemars(description = "Product name")]
    pub name: String,

    /// Net price in grosze.
    #[schemars(description = "Net price in grosze")]
    pub net_price: f64,

    /// VAT rate symbol.
    #[schemars(description = "VAT rate symbol, e.g. '23', '8', 'zw'")]
    pub tax_symbol: Option<TaxSymbol>,

    /// Unit of sale, e.g. "szt.".
    #[schemars(description = "Unit of sale, e.g. 'szt.'")]
    pub unit: Option<String>,
}

pub struct CreateProductTool;

impl CreateProductTool {
    pub const NAME: &'static str = "create_product";

    pub const DESCRIPTION: &'static str =
        "Create a product with a name and net price (in grosze).";

    fn build_body(params: &CreateProductParams) -> Result<Value, ToolError> {
        require_non_empty(&params.name, "name")?;
        require_positive(params.net_price, "net_price")?;

        let mut product = Map::new();
        product.insert("name".to_string(), json!(params.name));
        product.insert("net_price".to_string(), json!(params.net_price));
        product.insert(
            "tax_symbol".to_string(),
            serde_json::to_value(&params.tax_symbol)
                .map_err(|e| ToolError::internal(e.to_string()))?,
        );
        product.insert("unit".to_string(), json!(params.unit));
        Ok(json!({ "product": Value::Object(sanitize(product)) }))
    }

    pub async fn execute(
        params: CreateProductParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        let body = Self::build_body(&params)?;
        info!(name = %params.name, "creating product");
        let result = api.post("/products.json", Some(&body)).await?;
        Ok(payload_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CreateProductParams>(),
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
// update_product
// ============================================================================

/// Parameters for updating a product.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateProductParams {
    /// Identifier of the product to update.
    #[schemars(description = "Product identifier")]
    pub product_id: String,

    /// New product name.
    #[schemars(description = "Product name")]
    pub name: Option<String>,

    /// New net price in grosze.
    #[schemars(description = "Net price in grosze")]
    pub net_price: Option<f64>,

    /// New VAT rate symbol.
    #[schemars(description = "VAT rate symbol")]
    pub tax_symbol: Option<TaxSymbol>,

    /// New unit of sale.
    #[schemars(description = "Unit of sale")]
    pub unit: Option<String>,
}

pub struct UpdateProductTool;

impl UpdateProductTool {
    pub const NAME: &'static str = "update_product";

    pub const DESCRIPTION: &'static str =
        "Update fields of an existing product. Only the supplied fields are sent.";

    fn build_body(params: &UpdateProductParams) -> Result<Value, ToolError> {
        if let Some(name) = &params.name {
            require_non_empty(name, "name")?;
        }
        if let Some(net_price) = params.net_price {
            require_non_negative(net_price, "net_price")?;
        }

        let mut product = Map::new();
        product.insert("name".to_string(), json!(params.name));
        product.insert("net_price".to_string(), json!(params.net_price));
        product.insert(
            "tax_symbol".to_string(),
            serde_json::to_value(&params.tax_symbol)
                .map_err(|e| ToolError::internal(e.to_string()))?,
        );
        product.insert("unit".to_string(), json!(params.unit));

        let product = sanitize(product);
        if product.is_empty() {
            return Err(ToolError::invalid_arguments(
                "at least one field to update must be provided",
            ));
        }
        Ok(json!({ "product": Value::Object(product) }))
    }

    pub async fn execute(
        params: UpdateProductParams,
        api: Arc<ApiClient>,
    ) -> Result<CallToolResult, ToolError> {
        require_numeric_id(&params.product_id, "product_id")?;
        let body = Self::build_body(&params)?;
        let path = format!("/products/{}.json", params.product_id);
        let result = api.put(&path, &body).await?;
        Ok(payload_result(&result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UpdateProductParams>(),
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
    fn test_list_products_name_filter() {
        let params: ListProductsParams =
            serde_json::from_value(json!({"name": "hosting"})).unwrap();
        let pairs = ListProductsTool::build_query(&params).unwrap();
        assert_eq!(pairs, vec![("q[name_cont]".to_string(), "hosting".to_string())]);
    }

    #[test]
    fn test_create_product_requires_positive_price() {
        let params: CreateProductParams = serde_json::from_value(json!({
            "name": "Hosting",
            "net_price": 0
        }))
        .unwrap();
        let err = CreateProductTool::build_body(&params).unwrap_err();
        assert!(err.to_string().contains("net_price"));
    }

    #[test]
    fn test_create_product_body() {
        let params: CreateProductParams = serde_json::from_value(json!({
            "name": "Hosting",
            "net_price": 9900,
            "tax_symbol": "23"
        }))
        .unwrap();
        let body = CreateProductTool::build_body(&params).unwrap();
        let product = body["product"].as_object().unwrap();
        // Price goes upstream in grosze, unconverted.
        assert_eq!(product["net_price"], json!(9900.0));
        assert!(!product.contains_key("unit"));
    }

    #[test]
    fn test_update_product_requires_some_field() {
        let params: UpdateProductParams =
            serde_json::from_value(json!({"product_id": "7"})).unwrap();
        assert!(UpdateProductTool::build_body(&params).is_err());
    }

    #[test]
    fn test_get_product_rejects_path_characters() {
        let config = crate::core::config::ApiConfig {
            api_key: "test-api-key".to_string(),
            base_url: "https://api.sandbox-infakt.pl/api/v3".to_string(),
            sandbox: true,
        };
        let api = Arc::new(ApiClient::new(&config).unwrap());
        let params: GetProductParams =
            serde_json::from_value(json!({"product_id": "7/../8"})).unwrap();
        let err = tokio_test::block_on(GetProductTool::execute(params, api)).unwrap_err();
        assert!(err.to_string().contains("product_id"));
    }
}
