//! Notebook operations (`/folders`)

use super::decode_entity;
use super::notes::DEFAULT_NOTE_FIELDS;
use super::pagination::Paginator;
use super::query::{EndpointBuilder, ListOptions};
use super::transport::Transport;
use crate::error::{JoplinError, Result};
use crate::models::{Note, Notebook};
use reqwest::Method;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Fields returned for notebooks unless the caller asks for others
pub const DEFAULT_NOTEBOOK_FIELDS: &str = "id,title,parent_id,created_time,updated_time";

/// Notebook operations
#[derive(Clone)]
pub struct NotebookOps {
    transport: Arc<dyn Transport>,
    paginator: Paginator,
}

impl NotebookOps {
    /// Create the notebook group
    pub fn new(transport: Arc<dyn Transport>, paginator: Paginator) -> Self {
        Self {
            transport,
            paginator,
        }
    }

    /// List all notebooks
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Notebook>> {
        let endpoint = EndpointBuilder::new("folders")
            .list_options(options, DEFAULT_NOTEBOOK_FIELDS)
            .build();
        self.paginator.fetch_up_to(&endpoint, options.limit).await
    }

    /// Get one notebook
    pub async fn get(&self, id: &str, fields: Option<&str>) -> Result<Notebook> {
        let endpoint = EndpointBuilder::new(format!("folders/{id}"))
            .param("fields", fields.unwrap_or(DEFAULT_NOTEBOOK_FIELDS))
            .build();
        let response = self.transport.request(Method::GET, &endpoint, None).await?;
        decode_entity(response, "notebook")
    }

    /// Create a notebook, nested under `parent_id` when given
    pub async fn create(&self, title: &str, parent_id: Option<&str>) -> Result<Notebook> {
        let mut body = Map::new();
        body.insert("title".into(), Value::from(title));
        if let Some(parent_id) = parent_id {
            body.insert("parent_id".into(), Value::from(parent_id));
        }

        let response = self
            .transport
            .request(Method::POST, "folders", Some(Value::Object(body)))
            .await?;
        let notebook: Notebook = decode_entity(response, "created notebook")?;
        tracing::info!("Created notebook {}", notebook.id);
        Ok(notebook)
    }

    /// Rename and/or re-parent a notebook
    ///
    /// An empty `parent_id` moves the notebook to the top level.
    pub async fn update(
        &self,
        id: &str,
        title: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<Notebook> {
        let mut body = Map::new();
        if let Some(title) = title {
            body.insert("title".into(), Value::from(title));
        }
        if let Some(parent_id) = parent_id {
            body.insert("parent_id".into(), Value::from(parent_id));
        }
        if body.is_empty() {
            return Err(JoplinError::InvalidArgument(
                "Nothing to update: provide a title or a parent_id".to_string(),
            ));
        }

        let response = self
            .transport
            .request(Method::PUT, &format!("folders/{id}"), Some(Value::Object(body)))
            .await?;
        let notebook: Notebook = decode_entity(response, "updated notebook")?;
        tracing::info!("Updated notebook {}", id);
        Ok(notebook)
    }

    /// Notes directly inside a notebook
    pub async fn notes(&self, id: &str, options: &ListOptions) -> Result<Vec<Note>> {
        let endpoint = EndpointBuilder::new(format!("folders/{id}/notes"))
            .list_options(options, DEFAULT_NOTE_FIELDS)
            .build();
        self.paginator.fetch_up_to(&endpoint, options.limit).await
    }

    /// Delete a notebook
    ///
    /// The service refuses to delete notebooks that still hold notes; that
    /// refusal comes back as [`JoplinError::Api`] unchanged.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.transport
            .request(Method::DELETE, &format!("folders/{id}"), None)
            .await?;
        tracing::info!("Deleted notebook {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use serde_json::json;

    fn ops(mock: &Arc<MockTransport>) -> NotebookOps {
        NotebookOps::new(mock.clone(), Paginator::new(mock.clone(), 100))
    }

    #[tokio::test]
    async fn test_list_uses_default_fields_and_sort() {
        let mock = Arc::new(MockTransport::new(|_| {
            Ok(Some(MockTransport::page(
                vec![json!({"id": "f1", "title": "Inbox", "parent_id": ""})],
                false,
            )))
        }));
        let options = ListOptions::new().with_order("title", crate::client::OrderDir::Asc);

        let notebooks = ops(&mock).list(&options).await.unwrap();
        assert_eq!(notebooks.len(), 1);
        assert!(notebooks[0].is_top_level());

        let call = &mock.calls()[0];
        assert_eq!(call.path(), "folders");
        assert_eq!(call.query("fields").as_deref(), Some(DEFAULT_NOTEBOOK_FIELDS));
        assert_eq!(call.query("order_by").as_deref(), Some("title"));
        assert_eq!(call.query("order_dir").as_deref(), Some("ASC"));
    }

    #[tokio::test]
    async fn test_create_with_parent() {
        let mock = Arc::new(MockTransport::new(|call| {
            Ok(Some(json!({
                "id": "new",
                "title": call.body.as_ref().unwrap()["title"],
                "parent_id": call.body.as_ref().unwrap()["parent_id"],
            })))
        }));

        let notebook = ops(&mock).create("Projects", Some("root")).await.unwrap();
        assert_eq!(notebook.id, "new");
        assert_eq!(notebook.parent_id.as_deref(), Some("root"));

        let call = &mock.calls()[0];
        assert!(call.is(&Method::POST, "folders"));
        assert_eq!(
            call.body,
            Some(json!({"title": "Projects", "parent_id": "root"}))
        );
    }

    #[tokio::test]
    async fn test_update_requires_a_change() {
        let mock = Arc::new(MockTransport::new(|_| Ok(None)));
        let err = ops(&mock).update("f1", None, None).await.unwrap_err();
        assert!(matches!(err, JoplinError::InvalidArgument(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_reparents_to_top_level() {
        let mock = Arc::new(MockTransport::new(|_| {
            Ok(Some(json!({"id": "f1", "parent_id": ""})))
        }));

        let notebook = ops(&mock).update("f1", None, Some("")).await.unwrap();
        assert!(notebook.is_top_level());
        assert_eq!(mock.calls()[0].body, Some(json!({"parent_id": ""})));
    }

    #[tokio::test]
    async fn test_delete_surfaces_service_refusal() {
        let mock = Arc::new(MockTransport::new(|_| {
            Err(JoplinError::Api {
                status: 500,
                body: "Cannot delete non-empty folder".to_string(),
            })
        }));

        let err = ops(&mock).delete("f1").await.unwrap_err();
        match err {
            JoplinError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "Cannot delete non-empty folder");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_notes_in_notebook_are_paginated() {
        let mock = Arc::new(MockTransport::new(|call| {
            let page = call.query("page").unwrap();
            let more = page == "1";
            Ok(Some(MockTransport::page(
                vec![json!({"id": format!("n{page}")})],
                more,
            )))
        }));

        let notes = ops(&mock).notes("f1", &ListOptions::new()).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert!(mock.calls().iter().all(|c| c.path() == "folders/f1/notes"));
    }
}
