//! Records exchanged with the Joplin Data API
//!
//! Collection endpoints honour a `fields` projection, so any attribute other than
//! `id` may be absent from a response. Optional attributes are therefore `Option`
//! and are skipped when serialized back out, which keeps tool output limited to
//! what was actually fetched.

use serde::{Deserialize, Serialize};

/// Wire-level pagination envelope returned by collection endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in service order; required
    pub items: Vec<T>,
    /// Whether another page follows; only a literal `true` counts
    #[serde(default, deserialize_with = "literal_true")]
    pub has_more: bool,
}

fn literal_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value == serde_json::Value::Bool(true))
}

/// A note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Note identifier
    #[serde(default)]
    pub id: String,
    /// Note title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Markdown body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Owning notebook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Creation time, milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
    /// Last update time, milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<i64>,
    /// 1 when the note is a to-do
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_todo: Option<i64>,
    /// To-do due time, 0 when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_due: Option<i64>,
    /// To-do completion time, 0 while open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_completed: Option<i64>,
    /// Soft-deletion time, 0 when not in the trash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_time: Option<i64>,
    /// Source URL recorded by the web clipper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// A note merged with its tags, as returned by the composed note fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteWithTags {
    /// The note itself
    #[serde(flatten)]
    pub note: Note,
    /// Tags attached to the note, fetched separately
    pub tags: Vec<Tag>,
}

/// A notebook (called a folder by the API)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Notebook identifier
    #[serde(default)]
    pub id: String,
    /// Notebook title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Parent notebook; empty or absent for top-level notebooks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Creation time, milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
    /// Last update time, milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<i64>,
}

impl Notebook {
    /// Whether the notebook sits at the root of the tree
    pub fn is_top_level(&self) -> bool {
        self.parent_id.as_deref().map_or(true, str::is_empty)
    }
}

/// A tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag identifier
    #[serde(default)]
    pub id: String,
    /// Tag title
    #[serde(default)]
    pub title: String,
}

impl Tag {
    /// Case-insensitive, full-string title comparison
    ///
    /// Only `name` is trimmed; the stored title is compared as is.
    pub fn title_matches(&self, name: &str) -> bool {
        self.title.to_lowercase() == name.trim().to_lowercase()
    }
}

/// Attachment metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource identifier; embedded references use `:/<id>`
    #[serde(default)]
    pub id: String,
    /// Resource title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Original file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// MIME type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    /// Size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    /// File extension without the dot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    /// Extracted text, when OCR ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_text: Option<String>,
    /// OCR state as reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_status: Option<i64>,
    /// Creation time, milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
    /// Last update time, milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<i64>,
}

/// One entry in an item's revision chain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    /// Revision identifier
    #[serde(default)]
    pub id: String,
    /// Previous revision in the chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Item the revision belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Item type code of the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<i64>,
    /// Item update time captured by this revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_updated_time: Option<i64>,
    /// Title diff, opaque to the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_diff: Option<String>,
    /// Body diff, opaque to the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_diff: Option<String>,
    /// Metadata diff, opaque to the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_diff: Option<String>,
    /// Creation time, milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
}

/// Result of the policy-checked resource deletion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResourceDeletion {
    /// Nothing referenced the resource and it was deleted
    Deleted {
        /// Deleted resource
        resource_id: String,
    },
    /// Notes still embed the resource, so it was left in place
    Blocked {
        /// Resource that was kept
        resource_id: String,
        /// Notes that reference it
        referenced_by: Vec<Note>,
        /// Explanation for the caller
        warning: String,
    },
}
