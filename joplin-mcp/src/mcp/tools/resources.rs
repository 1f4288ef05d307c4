//! Resource (attachment) tools

use crate::mcp::shared_utils::respond;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use crate::mcp::types::{
    DeleteResourceRequest, DownloadResourceRequest, GetResourceRequest, ListResourcesRequest,
    NoteIdRequest, ResourceIdRequest, UpdateResourceFileRequest, UpdateResourceMetadataRequest,
    UploadResourceRequest,
};
use crate::mcp::utils::generate_tool_schema;
use crate::models::ResourceDeletion;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Serialize;
use std::path::Path;

/// Register all resource tools with the registry
pub fn register_resource_tools(registry: &mut ToolRegistry) {
    registry.register(ListResourcesTool);
    registry.register(GetResourceTool);
    registry.register(GetNoteResourcesTool);
    registry.register(GetResourceNotesTool);
    registry.register(DownloadResourceTool);
    registry.register(UploadResourceTool);
    registry.register(UpdateResourceFileTool);
    registry.register(UpdateResourceMetadataTool);
    registry.register(DeleteResourceTool);
}

/// Result of a download
#[derive(Debug, Serialize)]
struct Downloaded<'a> {
    resource_id: &'a str,
    path: &'a str,
    bytes: u64,
}

/// Tool for listing resources
pub struct ListResourcesTool;

#[async_trait]
impl McpTool for ListResourcesTool {
    fn name(&self) -> &'static str {
        "list_resources"
    }

    fn description(&self) -> &'static str {
        "List all resources (attachments)"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<ListResourcesRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListResourcesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .resources()
            .list(&request.list.to_options())
            .await;
        respond(result, "list resources")
    }
}

/// Tool for getting resource metadata
pub struct GetResourceTool;

#[async_trait]
impl McpTool for GetResourceTool {
    fn name(&self) -> &'static str {
        "get_resource"
    }

    fn description(&self) -> &'static str {
        "Get a resource's metadata by ID. Use download_resource for its content."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<GetResourceRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetResourceRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .resources()
            .get(&request.resource_id, request.fields.as_deref())
            .await;
        respond(result, "get resource")
    }
}

/// Tool for listing the resources embedded in a note
pub struct GetNoteResourcesTool;

#[async_trait]
impl McpTool for GetNoteResourcesTool {
    fn name(&self) -> &'static str {
        "get_note_resources"
    }

    fn description(&self) -> &'static str {
        "List the resources embedded in a note"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<NoteIdRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: NoteIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context.api.resources().for_note(&request.note_id).await;
        respond(result, "get note resources")
    }
}

/// Tool for finding the notes that embed a resource
pub struct GetResourceNotesTool;

#[async_trait]
impl McpTool for GetResourceNotesTool {
    fn name(&self) -> &'static str {
        "get_resource_notes"
    }

    fn description(&self) -> &'static str {
        "List the notes that embed a resource"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<ResourceIdRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ResourceIdRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .resources()
            .notes_for_resource(&request.resource_id)
            .await;
        respond(result, "get resource notes")
    }
}

/// Tool for saving a resource's content to disk
pub struct DownloadResourceTool;

#[async_trait]
impl McpTool for DownloadResourceTool {
    fn name(&self) -> &'static str {
        "download_resource"
    }

    fn description(&self) -> &'static str {
        "Save a resource's file content to a local path"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<DownloadResourceRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: DownloadResourceRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .resources()
            .download(&request.resource_id, Path::new(&request.output_path))
            .await
            .map(|bytes| Downloaded {
                resource_id: &request.resource_id,
                path: &request.output_path,
                bytes,
            });
        respond(result, "download resource")
    }
}

/// Tool for uploading a file as a resource
pub struct UploadResourceTool;

#[async_trait]
impl McpTool for UploadResourceTool {
    fn name(&self) -> &'static str {
        "upload_resource"
    }

    fn description(&self) -> &'static str {
        "Upload a local file as a new resource. Embed it in a note with ![title](:/<resource id>)."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<UploadResourceRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: UploadResourceRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .resources()
            .upload(Path::new(&request.file_path), request.title.as_deref())
            .await;
        respond(result, "upload resource")
    }
}

/// Tool for replacing a resource's content
pub struct UpdateResourceFileTool;

#[async_trait]
impl McpTool for UpdateResourceFileTool {
    fn name(&self) -> &'static str {
        "update_resource_file"
    }

    fn description(&self) -> &'static str {
        "Replace a resource's file content. The resource keeps its ID, so notes embedding it show the new file."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<UpdateResourceFileRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: UpdateResourceFileRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .resources()
            .update_file(
                &request.resource_id,
                Path::new(&request.file_path),
                request.title.as_deref(),
            )
            .await;
        respond(result, "update resource file")
    }
}

/// Tool for changing resource metadata
pub struct UpdateResourceMetadataTool;

#[async_trait]
impl McpTool for UpdateResourceMetadataTool {
    fn name(&self) -> &'static str {
        "update_resource_metadata"
    }

    fn description(&self) -> &'static str {
        "Change a resource's title or file name without touching its content"
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<UpdateResourceMetadataRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: UpdateResourceMetadataRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context
            .api
            .resources()
            .update_metadata(
                &request.resource_id,
                request.title.as_deref(),
                request.filename.as_deref(),
            )
            .await;
        respond(result, "update resource metadata")
    }
}

/// Tool for deleting a resource
pub struct DeleteResourceTool;

#[async_trait]
impl McpTool for DeleteResourceTool {
    fn name(&self) -> &'static str {
        "delete_resource"
    }

    fn description(&self) -> &'static str {
        "Delete a resource. If notes still embed it, nothing is deleted and the referencing notes are returned instead; pass force=true to delete anyway."
    }

    fn schema(&self) -> serde_json::Value {
        generate_tool_schema::<DeleteResourceRequest>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: DeleteResourceRequest = BaseToolImpl::parse_arguments(arguments)?;
        if request.force {
            let result = context
                .api
                .resources()
                .delete(&request.resource_id)
                .await
                .map(|()| ResourceDeletion::Deleted {
                    resource_id: request.resource_id.clone(),
                });
            return respond(result, "delete resource");
        }

        let result = context
            .api
            .safe_delete_resource(&request.resource_id)
            .await;
        respond(result, "delete resource")
    }
}
