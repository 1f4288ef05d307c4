//! Tag tools
//!
//! Tools that take a tag name resolve it with an exact, case-insensitive title
//! match. A name with no such tag is reported as "Tag not found" rather than
//! falling back to the closest search hit.

use crate::mcp::shared_utils::{respond, Deleted};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use crate::mcp::types::{
    CreateTagRequest, DeleteTagRequest, GetTagRequest, ListTagsRequest, NoteTagsRequest,
    NotesByTagRequest, RenameTagRequest,
};
use crate::mcp::utils::{exactly_one, generate_tool_schema, Choice};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Register all tag tools with the registry
pub fn register_tag_tools(registry: &mut ToolRegistry) {
    registry.register(ListTagsTool);
    registry.register(GetTagTool);
    registry.register(CreateTagTool);
    registry.register(RenameTagTool);
    registry.register(DeleteTagTool);
    registry.register(GetNotesByTagTool);
    registry.register(AddTagsToNoteTool);
    registry.register(RemoveTagsFromNoteTool);
}

fn tag_reference<'a>(
    tag_id: &'a Option<String>,
    tag_name: &'a Option<String>,
) -> std::result::Result<Choice<'a>, McpError> {
    exactly_one(("tag_id", tag_id.as_deref()), ("tag_name", tag_name.as_deref()))
        .map_err(|msg| McpError::invalid_params(msg, None))
}

/// Tool for listing tags
pub struct ListTagsTool;

#[async_trait]
impl McpTool for ListTagsTool {
    fn name(&self) -> &'static str {
        "list_tags"
    }

    fn description(&self) -> &'static str {
        "List all tags"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<ListTagsRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListTagsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context.api.tags().list(&request.list.to_options()).await;
        respond(result, "list tags")
    }
}

/// Tool for getting a tag
pub struct GetTagTool;

#[async_trait]
impl McpTool for GetTagTool {
    fn name(&self) -> &'static str {
        "get_tag"
    }

    fn description(&self) -> &'static str {
        "Get a tag by ID"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<GetTagRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetTagRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context.api.tags().get(&request.tag_id).await;
        respond(result, "get tag")
    }
}

/// Tool for creating a tag
pub struct CreateTagTool;

#[async_trait]
impl McpTool for CreateTagTool {
    fn name(&self) -> &'static str {
        "create_tag"
    }

    fn description(&self) -> &'static str {
        "Create a tag"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<CreateTagRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateTagRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context.api.tags().create(&request.title).await;
        respond(result, "create tag")
    }
}

/// Tool for renaming a tag
pub struct RenameTagTool;

#[async_trait]
impl McpTool for RenameTagTool {
    fn name(&self) -> &'static str {
        "rename_tag"
    }

    fn description(&self) -> &'static str {
        "Rename a tag, given either its ID or its current name"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<RenameTagRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: RenameTagRequest = BaseToolImpl::parse_arguments(arguments)?;
        let tags = context.api.tags();
        let result = match tag_reference(&request.tag_id, &request.tag_name)? {
            Choice::First(id) => tags.rename(id, &request.new_title).await,
            Choice::Second(name) => tags.rename_by_name(name, &request.new_title).await,
        };
        respond(result, "rename tag")
    }
}

/// Tool for deleting a tag
pub struct DeleteTagTool;

#[async_trait]
impl McpTool for DeleteTagTool {
    fn name(&self) -> &'static str {
        "delete_tag"
    }

    fn description(&self) -> &'static str {
        "Delete a tag. Notes carrying it are kept."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<DeleteTagRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: DeleteTagRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .tags()
            .delete(&request.tag_id)
            .await
            .map(|()| Deleted::new(&request.tag_id));
        respond(result, "delete tag")
    }
}

/// Tool for listing the notes carrying a tag
pub struct GetNotesByTagTool;

#[async_trait]
impl McpTool for GetNotesByTagTool {
    fn name(&self) -> &'static str {
        "get_notes_by_tag"
    }

    fn description(&self) -> &'static str {
        "List the notes carrying a tag, given either its ID or its name"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<NotesByTagRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: NotesByTagRequest = BaseToolImpl::parse_arguments(arguments)?;
        let options = request.list.to_options();
        let tags = context.api.tags();
        let result = match tag_reference(&request.tag_id, &request.tag_name)? {
            Choice::First(id) => tags.notes_for_tag(id, &options).await,
            Choice::Second(name) => tags.notes_for_tag_name(name, &options).await,
        };
        respond(result, "get notes by tag")
    }
}

/// Tool for tagging a note
pub struct AddTagsToNoteTool;

#[async_trait]
impl McpTool for AddTagsToNoteTool {
    fn name(&self) -> &'static str {
        "add_tags_to_note"
    }

    fn description(&self) -> &'static str {
        "Attach tags to a note by name, creating tags that do not exist yet. Safe to repeat."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<NoteTagsRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: NoteTagsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .tags()
            .add_tags_to_note(&request.note_id, &request.tags)
            .await;
        respond(result, "add tags to note")
    }
}

/// Tool for untagging a note
pub struct RemoveTagsFromNoteTool;

#[async_trait]
impl McpTool for RemoveTagsFromNoteTool {
    fn name(&self) -> &'static str {
        "remove_tags_from_note"
    }

    fn description(&self) -> &'static str {
        "Detach tags from a note by name. Unknown or unattached tags are ignored."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<NoteTagsRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: NoteTagsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .tags()
            .remove_tags_from_note(&request.note_id, &request.tags)
            .await;
        respond(result, "remove tags from note")
    }
}
