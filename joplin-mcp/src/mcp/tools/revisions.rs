//! Revision history tools

use crate::mcp::shared_utils::respond;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use crate::mcp::types::{GetRevisionRequest, ListRevisionsRequest, NoteRevisionsRequest};
use crate::mcp::utils::generate_tool_schema;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Register all revision tools with the registry
pub fn register_revision_tools(registry: &mut ToolRegistry) {
    registry.register(ListRevisionsTool);
    registry.register(GetRevisionTool);
    registry.register(GetNoteRevisionsTool);
}

/// Tool for listing revisions
pub struct ListRevisionsTool;

#[async_trait]
impl McpTool for ListRevisionsTool {
    fn name(&self) -> &'static str {
        "list_revisions"
    }

    fn description(&self) -> &'static str {
        "List revision history entries for all items"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<ListRevisionsRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListRevisionsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .revisions()
            .list(&request.list.to_options())
            .await;
        respond(result, "list revisions")
    }
}

/// Tool for getting a revision
pub struct GetRevisionTool;

#[async_trait]
impl McpTool for GetRevisionTool {
    fn name(&self) -> &'static str {
        "get_revision"
    }

    fn description(&self) -> &'static str {
        "Get a revision by ID, including its title, body and metadata diffs"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<GetRevisionRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetRevisionRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context.api.revisions().get(&request.revision_id).await;
        respond(result, "get revision")
    }
}

/// Tool for listing a note's revisions
pub struct GetNoteRevisionsTool;

#[async_trait]
impl McpTool for GetNoteRevisionsTool {
    fn name(&self) -> &'static str {
        "get_note_revisions"
    }

    fn description(&self) -> &'static str {
        "List the revision history of one note"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<NoteRevisionsRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: NoteRevisionsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .revisions()
            .for_note(&request.note_id, &request.list.to_options())
            .await;
        respond(result, "get note revisions")
    }
}
