//! Repository for the `roles` collection.

use crate::error::StoreError;
use crate::models::role::{NotificationRole, UpdateRole};
use crate::store::{collections, DocumentStore, Filter};

use super::document;

/// Provides CRUD operations for notification roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a custom role under a fresh id, returning the stored role.
    pub async fn insert(
        store: &dyn DocumentStore,
        mut role: NotificationRole,
    ) -> Result<NotificationRole, StoreError> {
        role.id = document::insert(store, collections::ROLES, &role).await?;
        Ok(role)
    }

    /// Insert a role under its own id (used for seeding the defaults).
    ///
    /// Returns `false` if a role with that id already exists.
    pub async fn insert_default(
        store: &dyn DocumentStore,
        role: &NotificationRole,
    ) -> Result<bool, StoreError> {
        match document::insert_with_id(store, collections::ROLES, &role.id, role).await {
            Ok(()) => Ok(true),
            Err(StoreError::Conflict { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<NotificationRole>, StoreError> {
        document::find(store, collections::ROLES, id).await
    }

    /// List every role in insertion order.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<NotificationRole>, StoreError> {
        document::find_all(store, collections::ROLES, &Filter::all()).await
    }

    /// Apply a partial update and return the updated role.
    pub async fn update(
        store: &dyn DocumentStore,
        id: &str,
        input: &UpdateRole,
    ) -> Result<NotificationRole, StoreError> {
        document::patch(store, collections::ROLES, id, input).await
    }

    pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
        store.delete(collections::ROLES, id).await
    }
}
