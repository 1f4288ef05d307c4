//! Request types for MCP tools
//!
//! Each tool deserializes its arguments into one of these types, and the same
//! type produces the tool's JSON schema.

use crate::client::{ItemType, ListOptions, NewNote, NoteUpdate, OrderDir};
use serde::Deserialize;

/// Listing knobs shared by every listing tool
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListArgs {
    /// Comma-separated fields to return, e.g. "id,title,updated_time"
    pub fields: Option<String>,
    /// Field to sort by, e.g. "updated_time"
    pub order_by: Option<String>,
    /// Sort direction, ASC or DESC
    pub order_dir: Option<OrderDir>,
    /// Maximum number of items to return
    pub limit: Option<usize>,
}

impl ListArgs {
    /// Client listing options for these arguments
    pub fn to_options(&self) -> ListOptions {
        ListOptions {
            fields: self.fields.clone(),
            order_by: self.order_by.clone(),
            order_dir: self.order_dir,
            limit: self.limit,
        }
    }
}

/// Request to list notebooks
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListNotebooksRequest {
    /// Listing options
    #[serde(flatten)]
    pub list: ListArgs,
}

/// Request to get a notebook
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetNotebookRequest {
    /// Notebook ID
    pub notebook_id: String,
    /// Comma-separated fields to return
    pub fields: Option<String>,
}

/// Request to create a notebook
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateNotebookRequest {
    /// Notebook title
    pub title: String,
    /// Parent notebook ID, for a nested notebook
    pub parent_id: Option<String>,
}

/// Request to rename or move a notebook
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateNotebookRequest {
    /// Notebook ID
    pub notebook_id: String,
    /// New title
    pub title: Option<String>,
    /// New parent notebook ID; an empty string moves it to the top level
    pub parent_id: Option<String>,
}

/// Request to delete a notebook
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteNotebookRequest {
    /// Notebook ID
    pub notebook_id: String,
}

/// Request to list the notes of a notebook
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListNotebookNotesRequest {
    /// Notebook ID
    pub notebook_id: String,
    /// Listing options
    #[serde(flatten)]
    pub list: ListArgs,
}

/// Request to list notes
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListNotesRequest {
    /// Include notes in the trash (default: false)
    #[serde(default)]
    pub include_deleted: bool,
    /// Listing options
    #[serde(flatten)]
    pub list: ListArgs,
}

/// Request to search notes, notebooks or tags
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchNotesRequest {
    /// Search query; supports title:, body:, tag:, notebook:, created:, updated:,
    /// wildcards (plan*), exclusion (-draft) and any:1 for OR logic
    pub query: String,
    /// Restrict results to one item type (default: note)
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    /// Listing options
    #[serde(flatten)]
    pub list: ListArgs,
}

/// Request to get a note
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetNoteRequest {
    /// Note ID
    pub note_id: String,
    /// Comma-separated fields to return
    pub fields: Option<String>,
}

/// Request to create a note
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Markdown body; may be empty but must be given
    pub body: String,
    /// Notebook ID to create the note in
    pub notebook_id: Option<String>,
    /// Create the note as a to-do
    pub is_todo: Option<bool>,
    /// To-do due time in milliseconds since the epoch
    pub todo_due: Option<i64>,
    /// To-do completion time in milliseconds since the epoch
    pub todo_completed: Option<i64>,
    /// Comma-separated tag names; missing tags are created
    pub tags: Option<String>,
}

impl From<CreateNoteRequest> for NewNote {
    fn from(request: CreateNoteRequest) -> Self {
        NewNote {
            title: request.title,
            body: request.body,
            parent_id: request.notebook_id,
            is_todo: request.is_todo,
            todo_due: request.todo_due,
            todo_completed: request.todo_completed,
            tags: request.tags,
        }
    }
}

/// Request to update a note; only supplied fields change
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateNoteRequest {
    /// Note ID
    pub note_id: String,
    /// New title
    pub title: Option<String>,
    /// New Markdown body, replacing the current one
    pub body: Option<String>,
    /// Notebook ID to move the note into
    pub notebook_id: Option<String>,
    /// Convert to or from a to-do
    pub is_todo: Option<bool>,
    /// To-do due time in milliseconds since the epoch, 0 to clear
    pub todo_due: Option<i64>,
    /// To-do completion time in milliseconds since the epoch, 0 to reopen
    pub todo_completed: Option<i64>,
}

impl UpdateNoteRequest {
    /// Split into the note id and the client update
    pub fn into_parts(self) -> (String, NoteUpdate) {
        (
            self.note_id,
            NoteUpdate {
                title: self.title,
                body: self.body,
                parent_id: self.notebook_id,
                is_todo: self.is_todo,
                todo_due: self.todo_due,
                todo_completed: self.todo_completed,
            },
        )
    }
}

/// Request to append or prepend text to a note
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NoteTextRequest {
    /// Note ID
    pub note_id: String,
    /// Markdown text to add
    pub text: String,
}

/// Request to delete a note
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteNoteRequest {
    /// Note ID
    pub note_id: String,
    /// Delete permanently instead of moving to the trash (default: false)
    #[serde(default)]
    pub permanent: bool,
}

/// Request to move a note to another notebook
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MoveNoteRequest {
    /// Note ID
    pub note_id: String,
    /// Destination notebook ID
    pub notebook_id: String,
}

/// Request to list tags
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListTagsRequest {
    /// Listing options
    #[serde(flatten)]
    pub list: ListArgs,
}

/// Request to get a tag
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTagRequest {
    /// Tag ID
    pub tag_id: String,
}

/// Request to create a tag
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateTagRequest {
    /// Tag title
    pub title: String,
}

/// Request to rename a tag, addressed by ID or by its current name
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenameTagRequest {
    /// Tag ID
    pub tag_id: Option<String>,
    /// Current tag name, matched exactly but case-insensitively
    pub tag_name: Option<String>,
    /// New title
    pub new_title: String,
}

/// Request to delete a tag
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteTagRequest {
    /// Tag ID
    pub tag_id: String,
}

/// Request to list the notes carrying a tag, addressed by ID or name
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NotesByTagRequest {
    /// Tag ID
    pub tag_id: Option<String>,
    /// Tag name, matched exactly but case-insensitively
    pub tag_name: Option<String>,
    /// Listing options
    #[serde(flatten)]
    pub list: ListArgs,
}

/// Request to add or remove tags on a note
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NoteTagsRequest {
    /// Note ID
    pub note_id: String,
    /// Comma-separated tag names, e.g. "work, urgent"
    pub tags: String,
}

/// Request to list resources
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListResourcesRequest {
    /// Listing options
    #[serde(flatten)]
    pub list: ListArgs,
}

/// Request to get resource metadata
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetResourceRequest {
    /// Resource ID
    pub resource_id: String,
    /// Comma-separated fields to return
    pub fields: Option<String>,
}

/// Request naming a single resource
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResourceIdRequest {
    /// Resource ID
    pub resource_id: String,
}

/// Request naming a single note
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NoteIdRequest {
    /// Note ID
    pub note_id: String,
}

/// Request to download a resource's content
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DownloadResourceRequest {
    /// Resource ID
    pub resource_id: String,
    /// Local path to write the file to; parent directories are created
    pub output_path: String,
}

/// Request to upload a file as a new resource
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UploadResourceRequest {
    /// Local path of the file to upload
    pub file_path: String,
    /// Resource title (default: the file name)
    pub title: Option<String>,
}

/// Request to replace a resource's content
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateResourceFileRequest {
    /// Resource ID, kept so existing links stay valid
    pub resource_id: String,
    /// Local path of the replacement file
    pub file_path: String,
    /// New title
    pub title: Option<String>,
}

/// Request to change resource metadata
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateResourceMetadataRequest {
    /// Resource ID
    pub resource_id: String,
    /// New title
    pub title: Option<String>,
    /// New file name
    pub filename: Option<String>,
}

/// Request to delete a resource
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteResourceRequest {
    /// Resource ID
    pub resource_id: String,
    /// Delete even if notes still embed the resource (default: false)
    #[serde(default)]
    pub force: bool,
}

/// Request to list revisions
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRevisionsRequest {
    /// Listing options
    #[serde(flatten)]
    pub list: ListArgs,
}

/// Request to get a revision
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRevisionRequest {
    /// Revision ID
    pub revision_id: String,
}

/// Request to list the revisions of a note
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NoteRevisionsRequest {
    /// Note ID
    pub note_id: String,
    /// Listing options
    #[serde(flatten)]
    pub list: ListArgs,
}
