//! Resource (attachment) operations (`/resources`)

use super::decode_entity;
use super::notes::DEFAULT_NOTE_FIELDS;
use super::pagination::Paginator;
use super::query::{EndpointBuilder, ListOptions};
use super::safety::ResourceStore;
use super::transport::Transport;
use crate::error::{JoplinError, Result};
use crate::models::{Note, Resource};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

/// Fields returned for resources unless the caller asks for others
pub const DEFAULT_RESOURCE_FIELDS: &str =
    "id,title,filename,mime,size,file_extension,created_time,updated_time";

/// Resource operations
///
/// [`ResourceOps::delete`] is unconditional. Reference checks before deletion
/// live in [`super::safety::SafeResourceDeletion`].
#[derive(Clone)]
pub struct ResourceOps {
    transport: Arc<dyn Transport>,
    paginator: Paginator,
}

impl ResourceOps {
    /// Create the resource group
    pub fn new(transport: Arc<dyn Transport>, paginator: Paginator) -> Self {
        Self {
            transport,
            paginator,
        }
    }

    /// List all resources
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Resource>> {
        let endpoint = EndpointBuilder::new("resources")
            .list_options(options, DEFAULT_RESOURCE_FIELDS)
            .build();
        self.paginator.fetch_up_to(&endpoint, options.limit).await
    }

    /// Get resource metadata
    pub async fn get(&self, id: &str, fields: Option<&str>) -> Result<Resource> {
        let endpoint = EndpointBuilder::new(format!("resources/{id}"))
            .param("fields", fields.unwrap_or(DEFAULT_RESOURCE_FIELDS))
            .build();
        let response = self.transport.request(Method::GET, &endpoint, None).await?;
        decode_entity(response, "resource")
    }

    /// Resources embedded in a note
    pub async fn for_note(&self, note_id: &str) -> Result<Vec<Resource>> {
        let endpoint = EndpointBuilder::new(format!("notes/{note_id}/resources"))
            .param("fields", DEFAULT_RESOURCE_FIELDS)
            .build();
        self.paginator.fetch_all(&endpoint).await
    }

    /// Notes that embed a resource
    pub async fn notes_for_resource(&self, id: &str) -> Result<Vec<Note>> {
        let endpoint = EndpointBuilder::new(format!("resources/{id}/notes"))
            .param("fields", DEFAULT_NOTE_FIELDS)
            .build();
        self.paginator.fetch_all(&endpoint).await
    }

    /// Stream the resource's content into `destination`, returning the byte count
    pub async fn download(&self, id: &str, destination: &Path) -> Result<u64> {
        let bytes = self
            .transport
            .download(&format!("resources/{id}/file"), destination)
            .await?;
        tracing::info!(
            "Downloaded resource {} to {} ({} bytes)",
            id,
            destination.display(),
            bytes
        );
        Ok(bytes)
    }

    /// Upload a local file as a new resource
    ///
    /// Without a title the file name is used.
    pub async fn upload(&self, file: &Path, title: Option<&str>) -> Result<Resource> {
        let title = match title {
            Some(title) => title.to_string(),
            None => file_title(file)?,
        };
        let props = Value::Object(Map::from_iter([("title".to_string(), Value::from(title))]));

        let response = self
            .transport
            .upload(Method::POST, "resources", props, file)
            .await?;
        let resource: Resource = decode_entity(response, "uploaded resource")?;
        tracing::info!("Uploaded {} as resource {}", file.display(), resource.id);
        Ok(resource)
    }

    /// Replace a resource's content, keeping its id
    ///
    /// Notes reference resources by id, so embedded links keep working.
    pub async fn update_file(
        &self,
        id: &str,
        file: &Path,
        title: Option<&str>,
    ) -> Result<Resource> {
        let mut props = Map::new();
        if let Some(title) = title {
            props.insert("title".into(), Value::from(title));
        }

        let response = self
            .transport
            .upload(Method::PUT, &format!("resources/{id}"), Value::Object(props), file)
            .await?;
        let resource: Resource = decode_entity(response, "updated resource")?;
        tracing::info!("Replaced content of resource {} from {}", id, file.display());
        Ok(resource)
    }

    /// Change resource metadata without touching its content
    pub async fn update_metadata(
        &self,
        id: &str,
        title: Option<&str>,
        filename: Option<&str>,
    ) -> Result<Resource> {
        let mut body = Map::new();
        if let Some(title) = title {
            body.insert("title".into(), Value::from(title));
        }
        if let Some(filename) = filename {
            body.insert("filename".into(), Value::from(filename));
        }
        if body.is_empty() {
            return Err(JoplinError::InvalidArgument(
                "Nothing to update: provide a title or a filename".to_string(),
            ));
        }

        let response = self
            .transport
            .request(Method::PUT, &format!("resources/{id}"), Some(Value::Object(body)))
            .await?;
        let resource: Resource = decode_entity(response, "updated resource")?;
        tracing::info!("Updated metadata of resource {}", id);
        Ok(resource)
    }

    /// Delete a resource regardless of which notes embed it
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.transport
            .request(Method::DELETE, &format!("resources/{id}"), None)
            .await?;
        tracing::info!("Deleted resource {}", id);
        Ok(())
    }
}

fn file_title(file: &Path) -> Result<String> {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            JoplinError::InvalidArgument(format!("'{}' does not name a file", file.display()))
        })
}

#[async_trait]
impl ResourceStore for ResourceOps {
    async fn referencing_notes(&self, resource_id: &str) -> Result<Vec<Note>> {
        self.notes_for_resource(resource_id).await
    }

    async fn delete_resource(&self, resource_id: &str) -> Result<()> {
        self.delete(resource_id).await
    }
}
