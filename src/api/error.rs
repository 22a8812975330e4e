//! Remote API error taxonomy and translation.
//!
//! Every failed call to the inFakt API, whether an HTTP error status or a
//! transport-level failure, is translated here into an [`ApiError`] before
//! leaving the client. The error carries the numeric status (when there was
//! a response), the most specific message the error body offered, and the
//! raw body serialized for diagnostics.

use rmcp::ErrorData as McpError;
use serde_json::Value;
use thiserror::Error;

/// Outward error category, mapped onto MCP error codes at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller mistakes mirrored by the remote side (400, 422).
    InvalidParameters,
    /// Authorization or existence problems (401, 403, 404).
    InvalidRequest,
    /// Everything else, including network failures and timeouts.
    Internal,
}

/// A translated remote API failure.
#[derive(Debug, Clone, Error)]
#[error("API error ({}): {message}", self.status_label())]
pub struct ApiError {
    /// HTTP status code; `None` for pure network failures.
    pub status: Option<u16>,
    /// Resolved human-readable message.
    pub message: String,
    /// Raw error body, serialized, when the remote supplied one.
    pub body: Option<String>,
    pub category: ErrorCategory,
}

impl ApiError {
    /// Translate an HTTP error status and its decoded body.
    pub fn from_status(status: u16, body: Option<&Value>) -> Self {
        let message = body
            .and_then(extract_body_message)
            .unwrap_or_else(|| status_message(status));
        Self {
            status: Some(status),
            message,
            body: body.map(Value::to_string),
            category: categorize(status),
        }
    }

    /// Translate a transport-level failure (no HTTP response).
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            body: None,
            category: ErrorCategory::Internal,
        }
    }

    /// Status label for display: the numeric code or "unknown".
    pub fn status_label(&self) -> String {
        match self.status {
            Some(status) => status.to_string(),
            None => "unknown".to_string(),
        }
    }

    /// Map into an MCP protocol error, attaching the raw body as data.
    pub fn into_mcp_error(self) -> McpError {
        let data = self
            .body
            .as_deref()
            .map(|body| serde_json::json!({ "status": self.status_label(), "body": body }));
        let message = self.to_string();
        match self.category {
            ErrorCategory::InvalidParameters => McpError::invalid_params(message, data),
            ErrorCategory::InvalidRequest => McpError::invalid_request(message, data),
            ErrorCategory::Internal => McpError::internal_error(message, data),
        }
    }
}

impl From<ApiError> for McpError {
    fn from(err: ApiError) -> Self {
        err.into_mcp_error()
    }
}

/// Map a status code onto an outward error category.
fn categorize(status: u16) -> ErrorCategory {
    match status {
        400 | 422 => ErrorCategory::InvalidParameters,
        401 | 403 | 404 => ErrorCategory::InvalidRequest,
        _ => ErrorCategory::Internal,
    }
}

/// Pull the most specific message out of a decoded error body.
///
/// Preference order: `message`, then `error`, then `errors` (a string, or
/// an array joined with ", ").
fn extract_body_message(body: &Value) -> Option<String> {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return Some(error.to_string());
    }
    match body.get("errors") {
        Some(Value::String(errors)) => Some(errors.clone()),
        Some(Value::Array(errors)) => {
            let joined: Vec<&str> = errors.iter().filter_map(Value::as_str).collect();
            if joined.is_empty() {
                None
            } else {
                Some(joined.join(", "))
            }
        }
        _ => None,
    }
}

/// Fixed fallback message for a status code without a usable error body.
fn status_message(status: u16) -> String {
    match status {
        400 => "Invalid request parameters".to_string(),
        401 => "Unauthorized - check your API key".to_string(),
        403 => "Forbidden - insufficient permissions".to_string(),
        404 => "Resource not found".to_string(),
        422 => "Validation failed on the remote side".to_string(),
        429 => "Rate limit exceeded".to_string(),
        500 => "Internal server error on the remote side".to_string(),
        503 => "Service unavailable".to_string(),
        other => format!("API error: {other}"),
    }
}
