//! Domain services for the campus announcement hub.
//!
//! Each service holds a shared [`DocumentStore`](campus_db::DocumentStore)
//! handle and is cheap to clone, so the HTTP layer can keep one instance of
//! each in its state.

pub mod content;
pub mod error;
pub mod fanout;
pub mod inbox;
pub mod preferences;
pub mod registry;

pub use content::ContentService;
pub use error::{ServiceError, ServiceResult};
pub use fanout::NotificationFanout;
pub use inbox::NotificationInbox;
pub use preferences::PreferenceService;
pub use registry::{RoleDeletion, RoleRegistry};

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use campus_db::store::{collections, Filter};
    use campus_db::{DocumentStore, MemoryStore, StoreError};
    use serde_json::Value;

    /// A memory store whose notification writes always fail.
    #[derive(Default)]
    pub struct FailingNotifications {
        inner: MemoryStore,
    }

    #[async_trait]
    impl DocumentStore for FailingNotifications {
        async fn create(&self, collection: &str, doc: Value) -> Result<String, StoreError> {
            if collection == collections::NOTIFICATIONS {
                return Err(StoreError::InvalidDocument("notifications are down".into()));
            }
            self.inner.create(collection, doc).await
        }

        async fn create_with_id(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError> {
            self.inner.create_with_id(collection, id, doc).await
        }

        async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
            self.inner.get(collection, id).await
        }

        async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError> {
            self.inner.update(collection, id, patch).await
        }

        async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
            self.inner.delete(collection, id).await
        }

        async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
            self.inner.query(collection, filter).await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }
}
