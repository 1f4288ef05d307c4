//! Revision history (`/revisions`)

use super::decode_entity;
use super::pagination::Paginator;
use super::query::{EndpointBuilder, ListOptions};
use super::transport::Transport;
use crate::error::Result;
use crate::models::Revision;
use reqwest::Method;
use std::sync::Arc;

/// Fields returned for revisions unless the caller asks for others
pub const DEFAULT_REVISION_FIELDS: &str =
    "id,parent_id,item_id,item_type,item_updated_time,created_time";

/// Revision operations
#[derive(Clone)]
pub struct RevisionOps {
    transport: Arc<dyn Transport>,
    paginator: Paginator,
}

impl RevisionOps {
    /// Create the revision group
    pub fn new(transport: Arc<dyn Transport>, paginator: Paginator) -> Self {
        Self {
            transport,
            paginator,
        }
    }

    /// List revisions of every item
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Revision>> {
        let endpoint = EndpointBuilder::new("revisions")
            .list_options(options, DEFAULT_REVISION_FIELDS)
            .build();
        self.paginator.fetch_up_to(&endpoint, options.limit).await
    }

    /// Get one revision including its diffs
    pub async fn get(&self, id: &str) -> Result<Revision> {
        let response = self
            .transport
            .request(Method::GET, &format!("revisions/{id}"), None)
            .await?;
        decode_entity(response, "revision")
    }

    /// Revisions of one note
    ///
    /// The service has no per-item revision endpoint, so every revision is
    /// fetched and filtered here. `limit` applies to the filtered result and
    /// `item_id` is always part of the scanned projection.
    pub async fn for_note(&self, note_id: &str, options: &ListOptions) -> Result<Vec<Revision>> {
        let scan = ListOptions {
            fields: Some(with_item_id(
                options.fields.as_deref().unwrap_or(DEFAULT_REVISION_FIELDS),
            )),
            ..options.clone()
        };
        let endpoint = EndpointBuilder::new("revisions")
            .list_options(&scan, DEFAULT_REVISION_FIELDS)
            .build();
        let revisions: Vec<Revision> = self.paginator.fetch_all(&endpoint).await?;

        let matching = revisions
            .into_iter()
            .filter(|revision| revision.item_id.as_deref() == Some(note_id));
        Ok(match options.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }
}

fn with_item_id(fields: &str) -> String {
    if fields.split(',').any(|field| field.trim() == "item_id") {
        fields.to_string()
    } else {
        format!("{fields},item_id")
    }
}
