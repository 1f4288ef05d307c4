//! Client for the Joplin Data API
//!
//! The client is split into domain groups (notebooks, notes, tags, resources,
//! revisions) sharing one [`Transport`] and one [`Paginator`]. [`JoplinApi`]
//! builds the groups and wires the two that depend on each other:
//!
//! - notes use [`TagLinks`] to merge tags into fetched notes and to tag new notes
//! - tags use [`ItemSearch`] to resolve tag names
//!
//! ```no_run
//! use joplin_mcp::{JoplinApi, JoplinConfig, ListOptions};
//!
//! # async fn example() -> joplin_mcp::Result<()> {
//! let api = JoplinApi::new(&JoplinConfig::new("token"));
//! for notebook in api.notebooks().list(&ListOptions::new()).await? {
//!     println!("{}", notebook.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod capabilities;
pub mod mock;
pub mod notebooks;
pub mod notes;
pub mod pagination;
pub mod query;
pub mod resources;
pub mod revisions;
pub mod safety;
pub mod tags;
pub mod transport;

pub use capabilities::{ItemSearch, TagLinks};
pub use mock::{MockTransport, RecordedCall};
pub use notebooks::NotebookOps;
pub use notes::{NewNote, NoteOps, NoteUpdate};
pub use pagination::Paginator;
pub use query::{ItemType, ListOptions, OrderDir};
pub use resources::ResourceOps;
pub use revisions::RevisionOps;
pub use safety::{ResourceStore, SafeResourceDeletion};
pub use tags::{parse_tag_names, TagOps};
pub use transport::{HttpTransport, Transport};

use crate::config::JoplinConfig;
use crate::error::{JoplinError, Result};
use crate::models::ResourceDeletion;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Decode a singular entity response, treating an empty body as a protocol error
pub(crate) fn decode_entity<T: DeserializeOwned>(response: Option<Value>, what: &str) -> Result<T> {
    let value = response
        .ok_or_else(|| JoplinError::Protocol(format!("Empty response, expected a {what}")))?;
    serde_json::from_value(value)
        .map_err(|e| JoplinError::Protocol(format!("Unexpected {what} payload: {e}")))
}

/// All domain groups over one connection
pub struct JoplinApi {
    notebooks: NotebookOps,
    notes: Arc<NoteOps>,
    tags: Arc<TagOps>,
    resources: Arc<ResourceOps>,
    revisions: RevisionOps,
    safe_deletion: SafeResourceDeletion,
}

impl JoplinApi {
    /// Connect to the service described by `config` over HTTP
    pub fn new(config: &JoplinConfig) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(config)), config.page_size)
    }

    /// Build every group on top of an existing transport
    pub fn with_transport(transport: Arc<dyn Transport>, page_size: usize) -> Self {
        let paginator = Paginator::new(transport.clone(), page_size);

        let notes = Arc::new(NoteOps::new(transport.clone(), paginator.clone()));
        let tags = Arc::new(TagOps::new(
            transport.clone(),
            paginator.clone(),
            notes.clone() as Arc<dyn ItemSearch>,
        ));
        notes.bind_tags(&(tags.clone() as Arc<dyn TagLinks>));

        let resources = Arc::new(ResourceOps::new(transport.clone(), paginator.clone()));
        let safe_deletion =
            SafeResourceDeletion::new(resources.clone() as Arc<dyn ResourceStore>);

        Self {
            notebooks: NotebookOps::new(transport.clone(), paginator.clone()),
            notes,
            tags,
            resources,
            revisions: RevisionOps::new(transport, paginator),
            safe_deletion,
        }
    }

    /// Notebook operations
    pub fn notebooks(&self) -> &NotebookOps {
        &self.notebooks
    }

    /// Note operations
    pub fn notes(&self) -> &NoteOps {
        &self.notes
    }

    /// Tag operations
    pub fn tags(&self) -> &TagOps {
        &self.tags
    }

    /// Raw resource operations
    pub fn resources(&self) -> &ResourceOps {
        &self.resources
    }

    /// Revision operations
    pub fn revisions(&self) -> &RevisionOps {
        &self.revisions
    }

    /// Delete a resource only when no note references it
    pub async fn safe_delete_resource(&self, id: &str) -> Result<ResourceDeletion> {
        self.safe_deletion.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_decode_entity_rejects_empty_body() {
        let err = decode_entity::<crate::models::Tag>(None, "tag").unwrap_err();
        assert!(matches!(err, JoplinError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_groups_are_wired_both_ways() {
        let mock = Arc::new(MockTransport::new(|call| {
            if call.path() == "search" {
                Ok(Some(MockTransport::page(
                    vec![json!({"id": "t1", "title": "work"})],
                    false,
                )))
            } else if call.path() == "notes/n1/tags" {
                Ok(Some(MockTransport::page(
                    vec![json!({"id": "t1", "title": "work"})],
                    false,
                )))
            } else {
                Ok(Some(json!({"id": "n1", "title": "Note"})))
            }
        }));
        let api = JoplinApi::with_transport(mock.clone(), 100);

        // notes -> tags
        let note = api.notes().get("n1", None).await.unwrap();
        assert_eq!(note.tags[0].id, "t1");

        // tags -> notes search
        let tag = api.tags().find_by_name("WORK").await.unwrap().unwrap();
        assert_eq!(tag.id, "t1");
        let search = mock.calls_to(Method::GET, "search");
        assert_eq!(search[0].query("type").as_deref(), Some("tag"));
        assert_eq!(search[0].query("query").as_deref(), Some("WORK"));
    }
}
