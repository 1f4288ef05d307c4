//! Narrow interfaces the domain groups consume from each other
//!
//! Notes need to read and assign tags; tags need the search endpoint to resolve
//! names. Each side depends on one of these traits instead of the other group's
//! concrete type, and [`super::JoplinApi`] wires them together at construction.

use crate::error::Result;
use crate::models::Tag;
use crate::client::query::ItemType;
use async_trait::async_trait;
use serde_json::Value;

/// Tag operations the note group relies on
#[async_trait]
pub trait TagLinks: Send + Sync {
    /// Tags currently attached to a note
    async fn tags_for_note(&self, note_id: &str) -> Result<Vec<Tag>>;

    /// Attach every tag in a comma-separated list, creating missing tags
    async fn add_tags_to_note(&self, note_id: &str, tag_names: &str) -> Result<Vec<Tag>>;
}

/// Free-text search the tag group relies on for name resolution
#[async_trait]
pub trait ItemSearch: Send + Sync {
    /// Run a search, optionally restricted to one item type
    async fn search_items(
        &self,
        query: &str,
        item_type: Option<ItemType>,
        fields: Option<&str>,
    ) -> Result<Vec<Value>>;
}
