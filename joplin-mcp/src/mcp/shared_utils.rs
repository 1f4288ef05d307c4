//! Shared utilities for MCP operations
//!
//! Client results are turned into tool results in one place so every tool
//! reports success and failure the same way.

use super::tool_registry::BaseToolImpl;
use crate::error::{JoplinError, Result};
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Serialize;

/// Common error handling patterns for MCP operations
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Convert a client error into a tool response
    ///
    /// Bad arguments become `invalid_params` protocol errors. Everything the note
    /// service or the network reports becomes a tool result flagged as an error,
    /// with the full message so the caller can see the status and service text.
    pub fn handle_error(
        error: JoplinError,
        operation: &str,
    ) -> std::result::Result<CallToolResult, McpError> {
        tracing::error!("MCP operation '{}' failed: {}", operation, error);

        match error {
            JoplinError::InvalidArgument(msg) => Err(McpError::invalid_params(msg, None)),
            other => Ok(BaseToolImpl::create_error_response(
                format!("Failed to {operation}"),
                Some(other.to_string()),
            )),
        }
    }
}

/// Render a value as a pretty-printed JSON success response
pub fn json_response<T: Serialize>(value: &T) -> std::result::Result<CallToolResult, McpError> {
    serde_json::to_string_pretty(value)
        .map(BaseToolImpl::create_success_response)
        .map_err(|e| McpError::internal_error(format!("Failed to serialize result: {e}"), None))
}

/// Map a client result onto a tool response
pub fn respond<T: Serialize>(
    result: Result<T>,
    operation: &str,
) -> std::result::Result<CallToolResult, McpError> {
    match result {
        Ok(value) => json_response(&value),
        Err(error) => McpErrorHandler::handle_error(error, operation),
    }
}

/// Confirmation payload for operations that return nothing
#[derive(Debug, Serialize)]
pub struct Deleted<'a> {
    /// Always `deleted`
    pub status: &'static str,
    /// Identifier of the removed item
    pub id: &'a str,
}

impl<'a> Deleted<'a> {
    /// Confirmation for `id`
    pub fn new(id: &'a str) -> Self {
        Self {
            status: "deleted",
            id,
        }
    }
}
