//! Tag operations (`/tags`)
//!
//! Tags are addressed by id on the wire, but callers usually know them by
//! name. Names are resolved through the search endpoint with a tag type filter,
//! and because search ranks by relevance rather than exactness every candidate
//! is re-checked with [`Tag::title_matches`] before it is used.

use super::capabilities::{ItemSearch, TagLinks};
use super::decode_entity;
use super::notes::DEFAULT_NOTE_FIELDS;
use super::pagination::Paginator;
use super::query::{EndpointBuilder, ItemType, ListOptions};
use super::transport::Transport;
use crate::error::{JoplinError, Result};
use crate::models::{Note, Tag};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;

/// Fields returned for tags unless the caller asks for others
pub const DEFAULT_TAG_FIELDS: &str = "id,title";

/// Split a comma-separated tag list, trimming names and dropping empty ones
pub fn parse_tag_names(names: &str) -> Vec<&str> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Tag operations
pub struct TagOps {
    transport: Arc<dyn Transport>,
    paginator: Paginator,
    search: Arc<dyn ItemSearch>,
}

impl TagOps {
    /// Create the tag group on top of a search capability used for name lookups
    pub fn new(
        transport: Arc<dyn Transport>,
        paginator: Paginator,
        search: Arc<dyn ItemSearch>,
    ) -> Self {
        Self {
            transport,
            paginator,
            search,
        }
    }

    /// List all tags
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Tag>> {
        let endpoint = EndpointBuilder::new("tags")
            .list_options(options, DEFAULT_TAG_FIELDS)
            .build();
        self.paginator.fetch_up_to(&endpoint, options.limit).await
    }

    /// Get one tag
    pub async fn get(&self, id: &str) -> Result<Tag> {
        let endpoint = EndpointBuilder::new(format!("tags/{id}"))
            .param("fields", DEFAULT_TAG_FIELDS)
            .build();
        let response = self.transport.request(Method::GET, &endpoint, None).await?;
        decode_entity(response, "tag")
    }

    /// Create a tag without checking for an existing one
    pub async fn create(&self, title: &str) -> Result<Tag> {
        let response = self
            .transport
            .request(Method::POST, "tags", Some(json!({ "title": title })))
            .await?;
        let tag: Tag = decode_entity(response, "created tag")?;
        tracing::info!("Created tag '{}' ({})", tag.title, tag.id);
        Ok(tag)
    }

    /// Rename a tag by id
    pub async fn rename(&self, id: &str, new_title: &str) -> Result<Tag> {
        let response = self
            .transport
            .request(
                Method::PUT,
                &format!("tags/{id}"),
                Some(json!({ "title": new_title })),
            )
            .await?;
        let tag: Tag = decode_entity(response, "renamed tag")?;
        tracing::info!("Renamed tag {} to '{}'", id, new_title);
        Ok(tag)
    }

    /// Rename the tag whose title is exactly `current`
    pub async fn rename_by_name(&self, current: &str, new_title: &str) -> Result<Tag> {
        let tag = self.require_by_name(current).await?;
        self.rename(&tag.id, new_title).await
    }

    /// Delete a tag; notes keep existing, only the associations go
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.transport
            .request(Method::DELETE, &format!("tags/{id}"), None)
            .await?;
        tracing::info!("Deleted tag {}", id);
        Ok(())
    }

    /// Notes carrying a tag
    pub async fn notes_for_tag(&self, id: &str, options: &ListOptions) -> Result<Vec<Note>> {
        let endpoint = EndpointBuilder::new(format!("tags/{id}/notes"))
            .list_options(options, DEFAULT_NOTE_FIELDS)
            .build();
        self.paginator.fetch_up_to(&endpoint, options.limit).await
    }

    /// Notes carrying the tag whose title is exactly `name`
    pub async fn notes_for_tag_name(&self, name: &str, options: &ListOptions) -> Result<Vec<Note>> {
        let tag = self.require_by_name(name).await?;
        self.notes_for_tag(&tag.id, options).await
    }

    /// Tags attached to a note
    pub async fn tags_for_note(&self, note_id: &str) -> Result<Vec<Tag>> {
        let endpoint = EndpointBuilder::new(format!("notes/{note_id}/tags"))
            .param("fields", DEFAULT_TAG_FIELDS)
            .build();
        self.paginator.fetch_all(&endpoint).await
    }

    /// Look a tag up by exact, case-insensitive title
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let name = name.trim();
        let candidates = self
            .search
            .search_items(name, Some(ItemType::Tag), Some(DEFAULT_TAG_FIELDS))
            .await?;

        for candidate in candidates {
            let tag: Tag = serde_json::from_value(candidate)
                .map_err(|e| JoplinError::Protocol(format!("Invalid tag in search results: {e}")))?;
            if tag.title_matches(name) {
                return Ok(Some(tag));
            }
        }
        Ok(None)
    }

    async fn require_by_name(&self, name: &str) -> Result<Tag> {
        self.find_by_name(name)
            .await?
            .ok_or_else(|| JoplinError::TagNotFound(name.trim().to_string()))
    }

    /// Reuse the tag titled `name`, creating it when none matches exactly
    pub async fn find_or_create(&self, name: &str) -> Result<Tag> {
        match self.find_by_name(name).await? {
            Some(tag) => {
                tracing::debug!("Reusing tag '{}' ({})", tag.title, tag.id);
                Ok(tag)
            }
            None => self.create(name.trim()).await,
        }
    }

    /// Attach a tag to a note
    pub async fn attach(&self, tag_id: &str, note_id: &str) -> Result<()> {
        self.transport
            .request(
                Method::POST,
                &format!("tags/{tag_id}/notes"),
                Some(json!({ "id": note_id })),
            )
            .await?;
        Ok(())
    }

    /// Detach a tag from a note
    pub async fn detach(&self, tag_id: &str, note_id: &str) -> Result<()> {
        self.transport
            .request(
                Method::DELETE,
                &format!("tags/{tag_id}/notes/{note_id}"),
                None,
            )
            .await?;
        Ok(())
    }

    /// Attach every tag in a comma-separated list, creating tags as needed
    ///
    /// Names are handled one after another; the first failure stops the run and
    /// tags attached before it stay attached. Re-running with the same list is
    /// safe.
    pub async fn add_tags_to_note(&self, note_id: &str, tag_names: &str) -> Result<Vec<Tag>> {
        let mut attached = Vec::new();
        for name in parse_tag_names(tag_names) {
            let tag = self.find_or_create(name).await?;
            self.attach(&tag.id, note_id).await?;
            attached.push(tag);
        }
        tracing::info!("Attached {} tag(s) to note {}", attached.len(), note_id);
        Ok(attached)
    }

    /// Detach every tag in a comma-separated list
    ///
    /// Unknown tags and tags that are not attached are skipped, so removal is
    /// idempotent. Returns the tags that were resolved.
    pub async fn remove_tags_from_note(&self, note_id: &str, tag_names: &str) -> Result<Vec<Tag>> {
        let mut removed = Vec::new();
        for name in parse_tag_names(tag_names) {
            let Some(tag) = self.find_by_name(name).await? else {
                tracing::debug!("Tag '{}' does not exist, nothing to remove", name);
                continue;
            };
            match self.detach(&tag.id, note_id).await {
                Ok(()) => removed.push(tag),
                Err(e) if e.is_not_found() => {
                    tracing::debug!("Tag '{}' is not attached to note {}", name, note_id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl TagLinks for TagOps {
    async fn tags_for_note(&self, note_id: &str) -> Result<Vec<Tag>> {
        TagOps::tags_for_note(self, note_id).await
    }

    async fn add_tags_to_note(&self, note_id: &str, tag_names: &str) -> Result<Vec<Tag>> {
        TagOps::add_tags_to_note(self, note_id, tag_names).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;

    /// Search capability answering with a fixed candidate list
    struct FixedSearch(Vec<Value>);

    #[async_trait]
    impl ItemSearch for FixedSearch {
        async fn search_items(
            &self,
            _query: &str,
            item_type: Option<ItemType>,
            _fields: Option<&str>,
        ) -> Result<Vec<Value>> {
            assert_eq!(item_type, Some(ItemType::Tag));
            Ok(self.0.clone())
        }
    }

    fn tag_ops(mock: &Arc<MockTransport>, candidates: Vec<Value>) -> TagOps {
        TagOps::new(
            mock.clone(),
            Paginator::new(mock.clone(), 100),
            Arc::new(FixedSearch(candidates)),
        )
    }

    #[test]
    fn test_parse_tag_names() {
        assert_eq!(parse_tag_names("work, urgent"), vec!["work", "urgent"]);
        assert_eq!(parse_tag_names(" a ,, ,b,"), vec!["a", "b"]);
        assert!(parse_tag_names("").is_empty());
        assert!(parse_tag_names(" , ").is_empty());
    }

    #[tokio::test]
    async fn test_find_by_name_ignores_partial_matches() {
        let mock = Arc::new(MockTransport::new(|_| Ok(None)));
        let ops = tag_ops(
            &mock,
            vec![
                json!({"id": "t1", "title": "workshop"}),
                json!({"id": "t2", "title": "Work"}),
            ],
        );

        let tag = ops.find_by_name(" work ").await.unwrap().unwrap();
        assert_eq!(tag.id, "t2");
        assert!(ops.find_by_name("wor").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rename_by_name_reports_missing_tag() {
        let mock = Arc::new(MockTransport::new(|_| Ok(None)));
        let ops = tag_ops(&mock, vec![json!({"id": "t1", "title": "urgently"})]);

        let err = ops.rename_by_name("urgent", "later").await.unwrap_err();
        assert!(matches!(err, JoplinError::TagNotFound(ref name) if name == "urgent"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rename_by_name_puts_new_title() {
        let mock = Arc::new(MockTransport::new(|_| {
            Ok(Some(json!({"id": "t1", "title": "later"})))
        }));
        let ops = tag_ops(&mock, vec![json!({"id": "t1", "title": "Urgent"})]);

        let tag = ops.rename_by_name("urgent", "later").await.unwrap();
        assert_eq!(tag.title, "later");

        let call = &mock.calls()[0];
        assert!(call.is(&Method::PUT, "tags/t1"));
        assert_eq!(call.body, Some(json!({"title": "later"})));
    }

    #[tokio::test]
    async fn test_add_reuses_existing_tag() {
        let mock = Arc::new(MockTransport::new(|_| Ok(None)));
        let ops = tag_ops(&mock, vec![json!({"id": "t1", "title": "Work"})]);

        let tags = ops.add_tags_to_note("n1", "work").await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].id, "t1");

        assert!(mock.calls_to(Method::POST, "tags").is_empty());
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].is(&Method::POST, "tags/t1/notes"));
        assert_eq!(calls[0].body, Some(json!({"id": "n1"})));
    }

    #[tokio::test]
    async fn test_add_aborts_on_first_failure() {
        let mock = Arc::new(MockTransport::new(|call| {
            if call.is(&Method::POST, "tags") {
                Err(JoplinError::Api {
                    status: 500,
                    body: "boom".into(),
                })
            } else {
                Ok(None)
            }
        }));
        let ops = tag_ops(&mock, vec![json!({"id": "t1", "title": "work"})]);

        let err = ops
            .add_tags_to_note("n1", "work, missing, later")
            .await
            .unwrap_err();
        assert!(matches!(err, JoplinError::Api { status: 500, .. }));

        // work attached, missing failed to create, later never attempted
        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].is(&Method::POST, "tags/t1/notes"));
        assert!(calls[1].is(&Method::POST, "tags"));
    }

    #[tokio::test]
    async fn test_remove_skips_unknown_and_unattached() {
        let mock = Arc::new(MockTransport::new(|_| {
            Err(JoplinError::Api {
                status: 404,
                body: "Not Found".into(),
            })
        }));
        let ops = tag_ops(&mock, vec![json!({"id": "t1", "title": "work"})]);

        let removed = ops
            .remove_tags_from_note("n1", "work, nonexistent")
            .await
            .unwrap();
        assert!(removed.is_empty());

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].is(&Method::DELETE, "tags/t1/notes/n1"));
    }

    #[tokio::test]
    async fn test_remove_propagates_other_failures() {
        let mock = Arc::new(MockTransport::new(|_| {
            Err(JoplinError::Api {
                status: 500,
                body: "boom".into(),
            })
        }));
        let ops = tag_ops(&mock, vec![json!({"id": "t1", "title": "work"})]);

        assert!(ops.remove_tags_from_note("n1", "work").await.is_err());
    }

    #[tokio::test]
    async fn test_tags_for_note_is_paginated() {
        let mock = Arc::new(MockTransport::new(|call| {
            let more = call.query("page").as_deref() == Some("1");
            Ok(Some(MockTransport::page(
                vec![json!({"id": "t", "title": "x"})],
                more,
            )))
        }));
        let ops = tag_ops(&mock, vec![]);

        let tags = ops.tags_for_note("n1").await.unwrap();
        assert_eq!(tags.len(), 2);
        assert!(mock.calls().iter().all(|c| c.path() == "notes/n1/tags"));
    }
}
