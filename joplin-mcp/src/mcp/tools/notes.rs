//! Note tools

use crate::client::NewNote;
use crate::mcp::shared_utils::{respond, Deleted};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use crate::mcp::types::{
    CreateNoteRequest, DeleteNoteRequest, GetNoteRequest, ListNotesRequest, MoveNoteRequest,
    NoteTextRequest, SearchNotesRequest, UpdateNoteRequest,
};
use crate::mcp::utils::generate_tool_schema;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Register all note tools with the registry
pub fn register_note_tools(registry: &mut ToolRegistry) {
    registry.register(ListNotesTool);
    registry.register(SearchNotesTool);
    registry.register(GetNoteTool);
    registry.register(CreateNoteTool);
    registry.register(UpdateNoteTool);
    registry.register(AppendToNoteTool);
    registry.register(PrependToNoteTool);
    registry.register(DeleteNoteTool);
    registry.register(MoveNoteTool);
}

/// Tool for listing notes
pub struct ListNotesTool;

#[async_trait]
impl McpTool for ListNotesTool {
    fn name(&self) -> &'static str {
        "list_notes"
    }

    fn description(&self) -> &'static str {
        "List notes across all notebooks, without their bodies"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<ListNotesRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListNotesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notes()
            .list(request.include_deleted, &request.list.to_options())
            .await;
        respond(result, "list notes")
    }
}

/// Tool for searching
pub struct SearchNotesTool;

#[async_trait]
impl McpTool for SearchNotesTool {
    fn name(&self) -> &'static str {
        "search_notes"
    }

    fn description(&self) -> &'static str {
        "Search notes with Joplin's query syntax, e.g. 'title:meeting tag:work -draft'. Set type to search notebooks or tags instead."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<SearchNotesRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchNotesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notes()
            .search(&request.query, request.item_type, &request.list.to_options())
            .await;
        respond(result, "search notes")
    }
}

/// Tool for reading a note with its tags
pub struct GetNoteTool;

#[async_trait]
impl McpTool for GetNoteTool {
    fn name(&self) -> &'static str {
        "get_note"
    }

    fn description(&self) -> &'static str {
        "Get a note by ID, including its body and its tags"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<GetNoteRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetNoteRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notes()
            .get(&request.note_id, request.fields.as_deref())
            .await;
        respond(result, "get note")
    }
}

/// Tool for creating a note
pub struct CreateNoteTool;

#[async_trait]
impl McpTool for CreateNoteTool {
    fn name(&self) -> &'static str {
        "create_note"
    }

    fn description(&self) -> &'static str {
        "Create a note or to-do. Tags are given as comma-separated names and created when missing; they are attached after the note is created."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<CreateNoteRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateNoteRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context.api.notes().create(NewNote::from(request)).await;
        respond(result, "create note")
    }
}

/// Tool for partially updating a note
pub struct UpdateNoteTool;

#[async_trait]
impl McpTool for UpdateNoteTool {
    fn name(&self) -> &'static str {
        "update_note"
    }

    fn description(&self) -> &'static str {
        "Update a note. Only the fields provided are changed; body replaces the whole body."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<UpdateNoteRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: UpdateNoteRequest = BaseToolImpl::parse_arguments(arguments)?;
        let (note_id, update) = request.into_parts();
        let result = context.api.notes().update(&note_id, &update).await;
        respond(result, "update note")
    }
}

/// Tool for appending to a note
pub struct AppendToNoteTool;

#[async_trait]
impl McpTool for AppendToNoteTool {
    fn name(&self) -> &'static str {
        "append_to_note"
    }

    fn description(&self) -> &'static str {
        "Add text to the end of a note, separated from the existing body by a blank line"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<NoteTextRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: NoteTextRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notes()
            .append(&request.note_id, &request.text)
            .await;
        respond(result, "append to note")
    }
}

/// Tool for prepending to a note
pub struct PrependToNoteTool;

#[async_trait]
impl McpTool for PrependToNoteTool {
    fn name(&self) -> &'static str {
        "prepend_to_note"
    }

    fn description(&self) -> &'static str {
        "Add text to the start of a note, separated from the existing body by a blank line"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<NoteTextRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: NoteTextRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notes()
            .prepend(&request.note_id, &request.text)
            .await;
        respond(result, "prepend to note")
    }
}

/// Tool for deleting a note
pub struct DeleteNoteTool;

#[async_trait]
impl McpTool for DeleteNoteTool {
    fn name(&self) -> &'static str {
        "delete_note"
    }

    fn description(&self) -> &'static str {
        "Move a note to the trash, or delete it permanently with permanent=true"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<DeleteNoteRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: DeleteNoteRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notes()
            .delete(&request.note_id, request.permanent)
            .await
            .map(|()| Deleted::new(&request.note_id));
        respond(result, "delete note")
    }
}

/// Tool for moving a note between notebooks
pub struct MoveNoteTool;

#[async_trait]
impl McpTool for MoveNoteTool {
    fn name(&self) -> &'static str {
        "move_note"
    }

    fn description(&self) -> &'static str {
        "Move a note into another notebook"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<MoveNoteRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: MoveNoteRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .notes()
            .move_to_notebook(&request.note_id, &request.notebook_id)
            .await;
        respond(result, "move note")
    }
}
