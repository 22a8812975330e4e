//! Common utilities shared across tool definitions.
//!
//! Result shaping, the `q[...]` filter-pair convention used by inFakt list
//! endpoints, and pagination query assembly.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Content, Tool},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{ApiClient, QueryPairs};
use crate::domains::tools::ToolError;
use crate::domains::tools::money::convert_amount_fields;

/// Build a ToolRoute that deserializes typed params and runs an async
/// handler against the shared API client.
///
/// Every tool follows this shape; the handler is the tool's `execute`
/// function. Argument deserialization failures surface as invalid-params;
/// handler failures are translated through [`ToolError::into_mcp_error`].
pub fn client_route<S, P, Fut>(
    tool: Tool,
    api: Arc<ApiClient>,
    handler: fn(P, Arc<ApiClient>) -> Fut,
) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    P: DeserializeOwned + Send + 'static,
    Fut: Future<Output = Result<CallToolResult, ToolError>> + Send + 'static,
{
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let api = api.clone();
        async move {
            let params: P = serde_json::from_value(Value::Object(args))
                .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
            handler(params, api).await.map_err(ToolError::into_mcp_error)
        }
        .boxed()
    })
}

/// Create a success result with a single text block.
pub fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Serialize a payload for the text-only response format.
pub fn json_payload(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Success result carrying a JSON payload as text.
pub fn payload_result(value: &Value) -> CallToolResult {
    text_result(json_payload(value))
}

/// Success result with monetary fields converted to major units first.
///
/// Used for invoice, client, and reference-data responses. Product and cost
/// responses are returned unconverted.
pub fn converted_result(value: &Value) -> CallToolResult {
    payload_result(&convert_amount_fields(value))
}

// ============================================================================
// List query assembly
// ============================================================================

/// Builds `q[field_op]` filter pairs for list endpoints.
///
/// Exact match (`_eq`) for identifiers, status, and numbers; substring
/// (`_cont`) for free-text names; inclusive range (`_gteq`/`_lteq`) for date
/// pairs. Absent values produce no pair, so an all-empty filter sends
/// nothing at all.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    pairs: QueryPairs,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match filter.
    pub fn eq(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.pairs.push((format!("q[{field}_eq]"), value.to_string()));
        }
        self
    }

    /// Substring-contains filter.
    pub fn cont(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.pairs
                .push((format!("q[{field}_cont]"), value.to_string()));
        }
        self
    }

    /// Inclusive lower bound.
    pub fn gteq(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.pairs
                .push((format!("q[{field}_gteq]"), value.to_string()));
        }
        self
    }

    /// Inclusive upper bound.
    pub fn lteq(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.pairs
                .push((format!("q[{field}_lteq]"), value.to_string()));
        }
        self
    }

    pub fn into_pairs(self) -> QueryPairs {
        self.pairs
    }
}

/// Assemble pagination and listing query parameters.
pub fn list_pairs(
    offset: Option<i64>,
    limit: Option<i64>,
    order: Option<&str>,
    fields: Option<&str>,
) -> QueryPairs {
    let mut pairs = QueryPairs::new();
    if let Some(offset) = offset {
        pairs.push(("offset".to_string(), offset.to_string()));
    }
    if let Some(limit) = limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(order) = order {
        pairs.push(("order".to_string(), order.to_string()));
    }
    if let Some(fields) = fields {
        pairs.push(("fields".to_string(), fields.to_string()));
    }
    pairs
}
