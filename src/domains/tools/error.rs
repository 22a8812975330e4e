//! Tool-specific error types.
//!
//! Every failure raised while handling a tool call flows through
//! [`ToolError`] and is translated to an MCP protocol error exactly once,
//! in [`ToolError::into_mcp_error`].

use rmcp::ErrorData as McpError;
use rmcp::model::ErrorCode;
use thiserror::Error;

use super::validate::ValidationError;
use crate::api::ApiError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The remote API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Translate into an MCP protocol error.
    pub fn into_mcp_error(self) -> McpError {
        match self {
            Self::NotFound(msg) => McpError::new(ErrorCode::METHOD_NOT_FOUND, msg, None),
            Self::InvalidArguments(msg) => McpError::invalid_params(msg, None),
            Self::Api(err) => err.into_mcp_error(),
            Self::Internal(msg) => McpError::internal_error(msg, None),
        }
    }
}

/// Validation failures become invalid-argument errors, keeping the field path.
impl From<ValidationError> for ToolError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidArguments(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_keeps_field_path() {
        let err: ToolError = ValidationError::new("services[1].name", "must be a non-empty string")
            .into();
        assert!(err.to_string().contains("services[1].name"));
    }

    #[test]
    fn test_not_found_maps_to_method_not_found() {
        let mcp = ToolError::not_found("Unknown tool: frobnicate").into_mcp_error();
        assert_eq!(mcp.code, ErrorCode::METHOD_NOT_FOUND);
    }
}
