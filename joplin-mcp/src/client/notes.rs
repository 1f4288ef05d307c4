//! Note operations (`/notes`, `/search`)

use super::capabilities::{ItemSearch, TagLinks};
use super::decode_entity;
use super::pagination::Paginator;
use super::query::{EndpointBuilder, ItemType, ListOptions};
use super::tags::{parse_tag_names, DEFAULT_TAG_FIELDS};
use super::transport::Transport;
use crate::error::{JoplinError, Result};
use crate::models::{Note, NoteWithTags};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};
use std::sync::{Arc, OnceLock, Weak};

/// Fields returned for note listings unless the caller asks for others
pub const DEFAULT_NOTE_FIELDS: &str =
    "id,title,parent_id,created_time,updated_time,is_todo,todo_due,todo_completed";

/// Fields returned for a single note, body included
pub const NOTE_DETAIL_FIELDS: &str =
    "id,title,body,parent_id,created_time,updated_time,is_todo,todo_due,todo_completed,source_url";

/// Fields used for notebook hits in search results
const FOLDER_SEARCH_FIELDS: &str = "id,title,parent_id";

/// Separator placed between existing content and appended/prepended text
const CONTENT_SEPARATOR: &str = "\n\n";

/// Parameters for creating a note
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    /// Note title
    pub title: String,
    /// Markdown body
    pub body: String,
    /// Notebook to create the note in; the service picks one when absent
    pub parent_id: Option<String>,
    /// Create the note as a to-do
    pub is_todo: Option<bool>,
    /// To-do due time, milliseconds since the epoch
    pub todo_due: Option<i64>,
    /// To-do completion time, milliseconds since the epoch
    pub todo_completed: Option<i64>,
    /// Comma-separated tag names to attach after creation
    pub tags: Option<String>,
}

/// Partial note update; only fields that are set are sent
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    /// New title
    pub title: Option<String>,
    /// New body
    pub body: Option<String>,
    /// Notebook to move the note into
    pub parent_id: Option<String>,
    /// Convert to or from a to-do
    pub is_todo: Option<bool>,
    /// To-do due time, 0 clears it
    pub todo_due: Option<i64>,
    /// To-do completion time, 0 reopens the to-do
    pub todo_completed: Option<i64>,
}

impl NoteUpdate {
    /// Whether the update would change nothing
    pub fn is_empty(&self) -> bool {
        self.to_body().is_empty()
    }

    fn to_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        if let Some(title) = &self.title {
            body.insert("title".into(), Value::from(title.as_str()));
        }
        if let Some(text) = &self.body {
            body.insert("body".into(), Value::from(text.as_str()));
        }
        if let Some(parent_id) = &self.parent_id {
            body.insert("parent_id".into(), Value::from(parent_id.as_str()));
        }
        insert_todo_fields(&mut body, self.is_todo, self.todo_due, self.todo_completed);
        body
    }
}

fn insert_todo_fields(
    body: &mut Map<String, Value>,
    is_todo: Option<bool>,
    todo_due: Option<i64>,
    todo_completed: Option<i64>,
) {
    if let Some(is_todo) = is_todo {
        body.insert("is_todo".into(), Value::from(i64::from(is_todo)));
    }
    if let Some(due) = todo_due {
        body.insert("todo_due".into(), Value::from(due));
    }
    if let Some(completed) = todo_completed {
        body.insert("todo_completed".into(), Value::from(completed));
    }
}

/// Note operations
pub struct NoteOps {
    transport: Arc<dyn Transport>,
    paginator: Paginator,
    tags: OnceLock<Weak<dyn TagLinks>>,
}

impl NoteOps {
    /// Create the note group; tag operations are bound later with [`NoteOps::bind_tags`]
    pub fn new(transport: Arc<dyn Transport>, paginator: Paginator) -> Self {
        Self {
            transport,
            paginator,
            tags: OnceLock::new(),
        }
    }

    /// Wire in the tag operations used by composed fetches and tag-on-create
    ///
    /// Only the first binding takes effect.
    pub fn bind_tags(&self, tags: &Arc<dyn TagLinks>) {
        if self.tags.set(Arc::downgrade(tags)).is_err() {
            tracing::warn!("Tag operations already bound to the note group, ignoring rebind");
        }
    }

    fn tag_links(&self) -> Result<Arc<dyn TagLinks>> {
        self.tags.get().and_then(Weak::upgrade).ok_or_else(|| {
            JoplinError::Other("Tag operations are not available to the note group".to_string())
        })
    }

    /// List notes across all notebooks
    pub async fn list(&self, include_deleted: bool, options: &ListOptions) -> Result<Vec<Note>> {
        let mut builder = EndpointBuilder::new("notes").list_options(options, DEFAULT_NOTE_FIELDS);
        if include_deleted {
            builder = builder.param("include_deleted", "1");
        }
        self.paginator
            .fetch_up_to(&builder.build(), options.limit)
            .await
    }

    /// Free-text search
    ///
    /// `query` is passed through untouched, so the service's filter syntax
    /// (`title:`, `tag:`, wildcards, `any:1`, `-term`, date ranges) applies.
    /// Hits are returned as raw JSON since their shape depends on `item_type`.
    pub async fn search(
        &self,
        query: &str,
        item_type: Option<ItemType>,
        options: &ListOptions,
    ) -> Result<Vec<Value>> {
        let default_fields = match item_type {
            None | Some(ItemType::Note) => DEFAULT_NOTE_FIELDS,
            Some(ItemType::Folder) => FOLDER_SEARCH_FIELDS,
            Some(ItemType::Tag) => DEFAULT_TAG_FIELDS,
        };
        let endpoint = EndpointBuilder::new("search")
            .param("query", query)
            .param_opt("type", item_type.map(|t| t.as_str()))
            .list_options(options, default_fields)
            .build();
        self.paginator.fetch_up_to(&endpoint, options.limit).await
    }

    /// Fetch a note without its tags
    pub async fn fetch(&self, id: &str, fields: Option<&str>) -> Result<Note> {
        let endpoint = EndpointBuilder::new(format!("notes/{id}"))
            .param("fields", fields.unwrap_or(NOTE_DETAIL_FIELDS))
            .build();
        let response = self.transport.request(Method::GET, &endpoint, None).await?;
        decode_entity(response, "note")
    }

    /// Fetch a note together with its tags
    ///
    /// The note and its tag list are two independent reads issued concurrently,
    /// so they are not guaranteed to reflect the same instant.
    pub async fn get(&self, id: &str, fields: Option<&str>) -> Result<NoteWithTags> {
        let tags = self.tag_links()?;
        let (note, tags) = tokio::try_join!(self.fetch(id, fields), tags.tags_for_note(id))?;
        Ok(NoteWithTags { note, tags })
    }

    /// Create a note, then attach its tags
    ///
    /// Tags cannot be part of the create request, so they are attached in
    /// follow-up calls. If one of those fails the note still exists, untagged
    /// or partially tagged.
    pub async fn create(&self, new_note: NewNote) -> Result<NoteWithTags> {
        let tag_names = new_note.tags.as_deref().unwrap_or_default();
        // Resolve the capability up front so a wiring problem cannot leave a stray note
        let tag_links = if parse_tag_names(tag_names).is_empty() {
            None
        } else {
            Some(self.tag_links()?)
        };

        let mut body = Map::new();
        body.insert("title".into(), Value::from(new_note.title.as_str()));
        body.insert("body".into(), Value::from(new_note.body.as_str()));
        if let Some(parent_id) = &new_note.parent_id {
            body.insert("parent_id".into(), Value::from(parent_id.as_str()));
        }
        insert_todo_fields(
            &mut body,
            new_note.is_todo,
            new_note.todo_due,
            new_note.todo_completed,
        );

        let response = self
            .transport
            .request(Method::POST, "notes", Some(Value::Object(body)))
            .await?;
        let note: Note = decode_entity(response, "created note")?;
        tracing::info!("Created note {}", note.id);

        let tags = match tag_links {
            Some(links) => links.add_tags_to_note(&note.id, tag_names).await?,
            None => Vec::new(),
        };

        Ok(NoteWithTags { note, tags })
    }

    /// Apply a partial update
    pub async fn update(&self, id: &str, update: &NoteUpdate) -> Result<Note> {
        let body = update.to_body();
        if body.is_empty() {
            return Err(JoplinError::InvalidArgument(
                "Nothing to update: provide at least one field".to_string(),
            ));
        }

        let response = self
            .transport
            .request(Method::PUT, &format!("notes/{id}"), Some(Value::Object(body)))
            .await?;
        let note: Note = decode_entity(response, "updated note")?;
        tracing::info!("Updated note {}", id);
        Ok(note)
    }

    /// Add text after the current body, separated by a blank line
    pub async fn append(&self, id: &str, text: &str) -> Result<Note> {
        let current = self.current_body(id).await?;
        self.write_body(id, format!("{current}{CONTENT_SEPARATOR}{text}"))
            .await
    }

    /// Add text before the current body, separated by a blank line
    pub async fn prepend(&self, id: &str, text: &str) -> Result<Note> {
        let current = self.current_body(id).await?;
        self.write_body(id, format!("{text}{CONTENT_SEPARATOR}{current}"))
            .await
    }

    async fn current_body(&self, id: &str) -> Result<String> {
        let note = self.fetch(id, Some("id,body")).await?;
        Ok(note.body.unwrap_or_default())
    }

    async fn write_body(&self, id: &str, body: String) -> Result<Note> {
        let update = NoteUpdate {
            body: Some(body),
            ..Default::default()
        };
        self.update(id, &update).await
    }

    /// Delete a note; soft delete moves it to the trash
    pub async fn delete(&self, id: &str, permanent: bool) -> Result<()> {
        let mut builder = EndpointBuilder::new(format!("notes/{id}"));
        if permanent {
            builder = builder.param("permanent", "1");
        }
        self.transport
            .request(Method::DELETE, &builder.build(), None)
            .await?;
        tracing::info!("Deleted note {} (permanent: {})", id, permanent);
        Ok(())
    }

    /// Move a note into another notebook
    pub async fn move_to_notebook(&self, id: &str, notebook_id: &str) -> Result<Note> {
        let update = NoteUpdate {
            parent_id: Some(notebook_id.to_string()),
            ..Default::default()
        };
        self.update(id, &update).await
    }
}

#[async_trait]
impl ItemSearch for NoteOps {
    async fn search_items(
        &self,
        query: &str,
        item_type: Option<ItemType>,
        fields: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut options = ListOptions::new();
        options.fields = fields.map(str::to_string);
        self.search(query, item_type, &options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use crate::models::Tag;
    use serde_json::json;
    use std::sync::Mutex;

    /// Tag capability that records what it was asked to do
    #[derive(Default)]
    struct RecordingTags {
        added: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl TagLinks for RecordingTags {
        async fn tags_for_note(&self, _note_id: &str) -> Result<Vec<Tag>> {
            Ok(vec![Tag {
                id: "t1".into(),
                title: "work".into(),
            }])
        }

        async fn add_tags_to_note(&self, note_id: &str, tag_names: &str) -> Result<Vec<Tag>> {
            self.added
                .lock()
                .unwrap()
                .push((note_id.to_string(), tag_names.to_string()));
            Ok(Vec::new())
        }
    }

    fn note_ops(mock: &Arc<MockTransport>) -> (NoteOps, Arc<RecordingTags>) {
        let ops = NoteOps::new(mock.clone(), Paginator::new(mock.clone(), 100));
        let tags = Arc::new(RecordingTags::default());
        let links: Arc<dyn TagLinks> = tags.clone();
        ops.bind_tags(&links);
        (ops, tags)
    }

    fn body_store(initial: &str) -> Arc<MockTransport> {
        let stored = Arc::new(Mutex::new(initial.to_string()));
        Arc::new(MockTransport::new(move |call| {
            let mut body = stored.lock().unwrap();
            if call.method == Method::PUT {
                *body = call.body.as_ref().unwrap()["body"]
                    .as_str()
                    .unwrap()
                    .to_string();
            }
            Ok(Some(json!({"id": "n1", "body": *body})))
        }))
    }

    #[tokio::test]
    async fn test_append_uses_blank_line_separator() {
        let mock = body_store("A");
        let (ops, _) = note_ops(&mock);

        let note = ops.append("n1", "B").await.unwrap();
        assert_eq!(note.body.as_deref(), Some("A\n\nB"));

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].is(&Method::GET, "notes/n1"));
        assert_eq!(calls[0].query("fields").as_deref(), Some("id,body"));
        assert!(calls[1].is(&Method::PUT, "notes/n1"));
        assert_eq!(calls[1].body, Some(json!({"body": "A\n\nB"})));
    }

    #[tokio::test]
    async fn test_prepend_uses_blank_line_separator() {
        let mock = body_store("A");
        let (ops, _) = note_ops(&mock);

        let note = ops.prepend("n1", "B").await.unwrap();
        assert_eq!(note.body.as_deref(), Some("B\n\nA"));
        assert_eq!(mock.calls()[1].body, Some(json!({"body": "B\n\nA"})));
    }

    #[tokio::test]
    async fn test_append_does_not_write_when_read_fails() {
        let mock = Arc::new(MockTransport::new(|_| {
            Err(JoplinError::Api {
                status: 404,
                body: "Not Found".into(),
            })
        }));
        let (ops, _) = note_ops(&mock);

        assert!(ops.append("missing", "B").await.is_err());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_get_merges_tags() {
        let mock = Arc::new(MockTransport::new(|_| {
            Ok(Some(json!({"id": "n1", "title": "Hello", "body": "text"})))
        }));
        let (ops, _tags) = note_ops(&mock);

        let note = ops.get("n1", None).await.unwrap();
        assert_eq!(note.note.title.as_deref(), Some("Hello"));
        assert_eq!(note.tags.len(), 1);
        assert_eq!(note.tags[0].title, "work");
        assert_eq!(
            mock.calls()[0].query("fields").as_deref(),
            Some(NOTE_DETAIL_FIELDS)
        );
    }

    #[tokio::test]
    async fn test_get_without_bound_tags_fails() {
        let mock = Arc::new(MockTransport::new(|_| Ok(Some(json!({"id": "n1"})))));
        let ops = NoteOps::new(mock.clone(), Paginator::new(mock.clone(), 100));

        assert!(ops.get("n1", None).await.is_err());
    }

    #[tokio::test]
    async fn test_create_without_tags_skips_tagging() {
        let mock = Arc::new(MockTransport::new(|_| Ok(Some(json!({"id": "n9"})))));
        let (ops, tags) = note_ops(&mock);

        let created = ops
            .create(NewNote {
                title: "T".into(),
                body: "B".into(),
                tags: Some(" , ".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.note.id, "n9");
        assert!(tags.added.lock().unwrap().is_empty());
        assert_eq!(
            mock.calls()[0].body,
            Some(json!({"title": "T", "body": "B"}))
        );
    }

    #[tokio::test]
    async fn test_create_todo_and_tags_after_note() {
        let mock = Arc::new(MockTransport::new(|_| Ok(Some(json!({"id": "n9"})))));
        let (ops, tags) = note_ops(&mock);

        ops.create(NewNote {
            title: "Call Bob".into(),
            body: String::new(),
            parent_id: Some("f1".into()),
            is_todo: Some(true),
            todo_due: Some(1_700_000_000_000),
            tags: Some("work, urgent".into()),
            ..Default::default()
        })
        .await
        .unwrap();

        assert_eq!(
            mock.calls()[0].body,
            Some(json!({
                "title": "Call Bob",
                "body": "",
                "parent_id": "f1",
                "is_todo": 1,
                "todo_due": 1_700_000_000_000i64
            }))
        );
        let added = tags.added.lock().unwrap();
        assert_eq!(
            added.as_slice(),
            &[("n9".to_string(), "work, urgent".to_string())]
        );
    }

    #[tokio::test]
    async fn test_update_sends_only_supplied_fields() {
        let mock = Arc::new(MockTransport::new(|_| Ok(Some(json!({"id": "n1"})))));
        let (ops, _) = note_ops(&mock);

        let update = NoteUpdate {
            title: Some("New".into()),
            todo_completed: Some(0),
            ..Default::default()
        };
        ops.update("n1", &update).await.unwrap();
        assert_eq!(
            mock.calls()[0].body,
            Some(json!({"title": "New", "todo_completed": 0}))
        );

        let err = ops.update("n1", &NoteUpdate::default()).await.unwrap_err();
        assert!(matches!(err, JoplinError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_delete_soft_and_permanent() {
        let mock = Arc::new(MockTransport::new(|_| Ok(None)));
        let (ops, _) = note_ops(&mock);

        ops.delete("n1", false).await.unwrap();
        ops.delete("n1", true).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].endpoint, "notes/n1");
        assert_eq!(calls[1].path(), "notes/n1");
        assert_eq!(calls[1].query("permanent").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_move_to_notebook() {
        let mock = Arc::new(MockTransport::new(|_| {
            Ok(Some(json!({"id": "n1", "parent_id": "f2"})))
        }));
        let (ops, _) = note_ops(&mock);

        let note = ops.move_to_notebook("n1", "f2").await.unwrap();
        assert_eq!(note.parent_id.as_deref(), Some("f2"));
        assert_eq!(mock.calls()[0].body, Some(json!({"parent_id": "f2"})));
    }

    #[tokio::test]
    async fn test_search_passes_query_and_type() {
        let mock = Arc::new(MockTransport::new(|_| {
            Ok(Some(MockTransport::page(vec![json!({"id": "f1"})], false)))
        }));
        let (ops, _) = note_ops(&mock);

        let hits = ops
            .search("title:plan*", Some(ItemType::Folder), &ListOptions::new())
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let call = &mock.calls()[0];
        assert_eq!(call.path(), "search");
        assert_eq!(call.query("query").as_deref(), Some("title:plan*"));
        assert_eq!(call.query("type").as_deref(), Some("folder"));
        assert_eq!(call.query("fields").as_deref(), Some(FOLDER_SEARCH_FIELDS));
    }

    #[tokio::test]
    async fn test_list_include_deleted() {
        let mock = Arc::new(MockTransport::new(|_| {
            Ok(Some(MockTransport::page(vec![], false)))
        }));
        let (ops, _) = note_ops(&mock);

        ops.list(true, &ListOptions::new()).await.unwrap();
        ops.list(false, &ListOptions::new()).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].query("include_deleted").as_deref(), Some("1"));
        assert_eq!(calls[1].query("include_deleted"), None);
    }
}
