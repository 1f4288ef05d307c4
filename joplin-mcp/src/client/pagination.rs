//! Page-cursor aggregation
//!
//! Collection endpoints answer `{ items, has_more }` one page at a time. The
//! [`Paginator`] walks pages 1, 2, 3, ... and concatenates their items in request
//! order, so callers only ever see complete sequences.
//!
//! There is no ceiling on the number of pages: a service that keeps answering
//! `has_more: true` with non-empty pages is followed indefinitely.

use super::query::paged_endpoint;
use super::transport::Transport;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{JoplinError, Result};
use crate::models::Page;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Walks a collection endpoint until the service reports no more pages
#[derive(Clone)]
pub struct Paginator {
    transport: Arc<dyn Transport>,
    page_size: usize,
}

impl Paginator {
    /// Create a paginator requesting `page_size` items per page
    pub fn new(transport: Arc<dyn Transport>, page_size: usize) -> Self {
        Self {
            transport,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    /// Fetch every item of a collection endpoint
    pub async fn fetch_all<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        self.fetch_up_to(endpoint, None).await
    }

    /// Fetch items until the collection is exhausted or `max_items` are collected
    ///
    /// With a cap, the page size shrinks to the cap when that is smaller so the
    /// service is not asked for more than will be returned.
    pub async fn fetch_up_to<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        max_items: Option<usize>,
    ) -> Result<Vec<T>> {
        let page_size = match max_items {
            Some(0) => return Ok(Vec::new()),
            Some(max) => max.min(self.page_size),
            None => self.page_size,
        };

        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let response = self
                .transport
                .request(Method::GET, &paged_endpoint(endpoint, page_size, page), None)
                .await?
                .ok_or_else(|| {
                    JoplinError::Protocol(format!(
                        "Empty response for page {page} of '{endpoint}', expected a page envelope"
                    ))
                })?;

            let envelope: Page<T> = serde_json::from_value(response).map_err(|e| {
                JoplinError::Protocol(format!(
                    "Invalid page envelope for page {page} of '{endpoint}': {e}"
                ))
            })?;

            if envelope.items.is_empty() && envelope.has_more {
                return Err(JoplinError::Protocol(format!(
                    "Page {page} of '{endpoint}' is empty but reports more pages"
                )));
            }

            tracing::debug!(
                "Fetched page {} of '{}' ({} items, has_more={})",
                page,
                endpoint,
                envelope.items.len(),
                envelope.has_more
            );

            items.extend(envelope.items);

            if let Some(max) = max_items {
                if items.len() >= max {
                    items.truncate(max);
                    break;
                }
            }
            if !envelope.has_more {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}
