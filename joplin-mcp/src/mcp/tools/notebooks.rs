//! Notebook tools

use crate::mcp::shared_utils::{respond, Deleted};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use crate::mcp::types::{
    CreateNotebookRequest, DeleteNotebookRequest, GetNotebookRequest, ListNotebookNotesRequest,
    ListNotebooksRequest, UpdateNotebookRequest,
};
use crate::mcp::utils::generate_tool_schema;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Register all notebook tools with the registry
pub fn register_notebook_tools(registry: &mut ToolRegistry) {
    registry.register(ListNotebooksTool);
    registry.register(GetNotebookTool);
    registry.register(CreateNotebookTool);
    registry.register(UpdateNotebookTool);
    registry.register(DeleteNotebookTool);
    registry.register(ListNotebookNotesTool);
}

/// Tool for listing notebooks
pub struct ListNotebooksTool;

#[async_trait]
impl McpTool for ListNotebooksTool {
    fn name(&self) -> &'static str {
        "list_notebooks"
    }

    fn description(&self) -> &'static str {
        "List all notebooks. Nested notebooks carry their parent's ID in parent_id."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<ListNotebooksRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListNotebooksRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notebooks()
            .list(&request.list.to_options())
            .await;
        respond(result, "list notebooks")
    }
}

/// Tool for getting a notebook
pub struct GetNotebookTool;

#[async_trait]
impl McpTool for GetNotebookTool {
    fn name(&self) -> &'static str {
        "get_notebook"
    }

    fn description(&self) -> &'static str {
        "Get a notebook by ID"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<GetNotebookRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetNotebookRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notebooks()
            .get(&request.notebook_id, request.fields.as_deref())
            .await;
        respond(result, "get notebook")
    }
}

/// Tool for creating a notebook
pub struct CreateNotebookTool;

#[async_trait]
impl McpTool for CreateNotebookTool {
    fn name(&self) -> &'static str {
        "create_notebook"
    }

    fn description(&self) -> &'static str {
        "Create a notebook, optionally nested inside another notebook"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<CreateNotebookRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateNotebookRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notebooks()
            .create(&request.title, request.parent_id.as_deref())
            .await;
        respond(result, "create notebook")
    }
}

/// Tool for renaming or moving a notebook
pub struct UpdateNotebookTool;

#[async_trait]
impl McpTool for UpdateNotebookTool {
    fn name(&self) -> &'static str {
        "update_notebook"
    }

    fn description(&self) -> &'static str {
        "Rename a notebook and/or move it under another parent. An empty parent_id moves it to the top level."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<UpdateNotebookRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: UpdateNotebookRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notebooks()
            .update(
                &request.notebook_id,
                request.title.as_deref(),
                request.parent_id.as_deref(),
            )
            .await;
        respond(result, "update notebook")
    }
}

/// Tool for deleting a notebook
pub struct DeleteNotebookTool;

#[async_trait]
impl McpTool for DeleteNotebookTool {
    fn name(&self) -> &'static str {
        "delete_notebook"
    }

    fn description(&self) -> &'static str {
        "Delete a notebook. Joplin refuses to delete notebooks that still contain notes."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<DeleteNotebookRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: DeleteNotebookRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notebooks()
            .delete(&request.notebook_id)
            .await
            .map(|()| Deleted::new(&request.notebook_id));
        respond(result, "delete notebook")
    }
}

/// Tool for listing the notes in a notebook
pub struct ListNotebookNotesTool;

#[async_trait]
impl McpTool for ListNotebookNotesTool {
    fn name(&self) -> &'static str {
        "list_notebook_notes"
    }

    fn description(&self) -> &'static str {
        "List the notes directly inside a notebook"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<ListNotebookNotesRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListNotebookNotesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notebooks()
            .notes(&request.notebook_id, &request.list.to_options())
            .await;
        respond(result, "list notebook notes")
    }
}
