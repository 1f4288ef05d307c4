//! Reference-checked resource deletion
//!
//! Deleting a resource that a note still embeds leaves a dangling `:/<id>` link
//! in that note. [`SafeResourceDeletion`] asks which notes reference the
//! resource first and refuses to delete while any do.

use crate::error::Result;
use crate::models::{Note, ResourceDeletion};
use async_trait::async_trait;
use std::sync::Arc;

/// Raw resource access the deletion policy is built on
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Notes that embed the resource
    async fn referencing_notes(&self, resource_id: &str) -> Result<Vec<Note>>;

    /// Delete the resource unconditionally
    async fn delete_resource(&self, resource_id: &str) -> Result<()>;
}

/// Deletion policy that keeps referenced resources
pub struct SafeResourceDeletion {
    store: Arc<dyn ResourceStore>,
}

impl SafeResourceDeletion {
    /// Wrap a raw resource store
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// Delete the resource unless a note still references it
    pub async fn delete(&self, resource_id: &str) -> Result<ResourceDeletion> {
        let referenced_by = self.store.referencing_notes(resource_id).await?;
        if !referenced_by.is_empty() {
            tracing::warn!(
                "Not deleting resource {}: referenced by {} note(s)",
                resource_id,
                referenced_by.len()
            );
            let warning = format!(
                "Resource {} is still referenced by {} note(s); remove the references or force the deletion",
                resource_id,
                referenced_by.len()
            );
            return Ok(ResourceDeletion::Blocked {
                resource_id: resource_id.to_string(),
                referenced_by,
                warning,
            });
        }

        self.store.delete_resource(resource_id).await?;
        Ok(ResourceDeletion::Deleted {
            resource_id: resource_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JoplinError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStore {
        referencing: Vec<Note>,
        deletes: AtomicUsize,
    }

    impl CountingStore {
        fn new(referencing: Vec<Note>) -> Arc<Self> {
            Arc::new(Self {
                referencing,
                deletes: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ResourceStore for CountingStore {
        async fn referencing_notes(&self, _resource_id: &str) -> Result<Vec<Note>> {
            Ok(self.referencing.clone())
        }

        async fn delete_resource(&self, _resource_id: &str) -> Result<()> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_referenced_resource_is_kept() {
        let store = CountingStore::new(vec![Note {
            id: "n1".into(),
            title: Some("Trip".into()),
            ..Default::default()
        }]);
        let policy = SafeResourceDeletion::new(store.clone());

        match policy.delete("r1").await.unwrap() {
            ResourceDeletion::Blocked {
                resource_id,
                referenced_by,
                warning,
            } => {
                assert_eq!(resource_id, "r1");
                assert_eq!(referenced_by[0].id, "n1");
                assert!(warning.contains("1 note"));
            }
            other => panic!("expected a blocked deletion, got {other:?}"),
        }
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unreferenced_resource_is_deleted_once() {
        let store = CountingStore::new(Vec::new());
        let policy = SafeResourceDeletion::new(store.clone());

        let outcome = policy.delete("r1").await.unwrap();
        assert_eq!(
            outcome,
            ResourceDeletion::Deleted {
                resource_id: "r1".into()
            }
        );
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_prevents_deletion() {
        struct FailingStore;

        #[async_trait]
        impl ResourceStore for FailingStore {
            async fn referencing_notes(&self, _resource_id: &str) -> Result<Vec<Note>> {
                Err(JoplinError::Api {
                    status: 404,
                    body: "Not Found".into(),
                })
            }

            async fn delete_resource(&self, _resource_id: &str) -> Result<()> {
                panic!("delete must not be reached");
            }
        }

        let policy = SafeResourceDeletion::new(Arc::new(FailingStore));
        assert!(policy.delete("r1").await.unwrap_err().is_not_found());
    }
}
