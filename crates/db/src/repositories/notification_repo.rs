//! Repository for the `notifications` collection.

use serde_json::json;

use crate::error::StoreError;
use crate::models::notification::Notification;
use crate::store::{collections, DocumentStore, Filter};

use super::document;

/// Provides CRUD operations for per-user notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification, returning it with its generated id.
    pub async fn create(
        store: &dyn DocumentStore,
        mut notification: Notification,
    ) -> Result<Notification, StoreError> {
        notification.id = document::insert(store, collections::NOTIFICATIONS, &notification).await?;
        Ok(notification)
    }

    /// Find a notification owned by `user_id`. Another user's notification
    /// is reported as absent.
    pub async fn find_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Notification>, StoreError> {
        let found: Option<Notification> =
            document::find(store, collections::NOTIFICATIONS, id).await?;
        Ok(found.filter(|n| n.user_id == user_id))
    }

    /// List notifications for a user, newest first.
    ///
    /// When `unread_only` is `true`, only notifications with `is_read = false`
    /// are returned.
    pub async fn list_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
        unread_only: bool,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Notification>, StoreError> {
        let mut items: Vec<Notification> =
            document::find_all(store, collections::NOTIFICATIONS, &user_filter(user_id, unread_only))
                .await?;
        // Insertion order reversed breaks timestamp ties newest-first.
        items.reverse();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(items.into_iter().skip(offset).take(limit).collect())
    }

    /// Mark a single notification as read.
    ///
    /// Returns `true` if the notification exists for the given user, whether
    /// or not it was already read, and `false` otherwise.
    pub async fn mark_read(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        match Self::find_for_user(store, user_id, id).await? {
            Some(n) if !n.is_read => {
                store
                    .update(collections::NOTIFICATIONS, id, json!({ "is_read": true }))
                    .await?;
                Ok(true)
            }
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }

    /// Mark all unread notifications as read for a user.
    ///
    /// Returns the number of notifications that were marked read.
    pub async fn mark_all_read(store: &dyn DocumentStore, user_id: &str) -> Result<u64, StoreError> {
        let unread = store
            .query(collections::NOTIFICATIONS, &user_filter(user_id, true))
            .await?;
        let mut marked = 0;
        for doc in unread {
            let Some(id) = doc.get("id").and_then(|v| v.as_str()) else {
                continue;
            };
            match store
                .update(collections::NOTIFICATIONS, id, json!({ "is_read": true }))
                .await
            {
                Ok(()) => marked += 1,
                // Deleted concurrently; nothing left to mark.
                Err(StoreError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(marked)
    }

    /// Get the number of unread notifications for a user.
    pub async fn unread_count(store: &dyn DocumentStore, user_id: &str) -> Result<usize, StoreError> {
        Ok(store
            .query(collections::NOTIFICATIONS, &user_filter(user_id, true))
            .await?
            .len())
    }

    /// Get the total number of notifications for a user.
    pub async fn count_for_user(store: &dyn DocumentStore, user_id: &str) -> Result<usize, StoreError> {
        Ok(store
            .query(collections::NOTIFICATIONS, &user_filter(user_id, false))
            .await?
            .len())
    }

    /// Delete a notification owned by `user_id`.
    ///
    /// Returns `false` if it does not exist or belongs to someone else.
    pub async fn delete(store: &dyn DocumentStore, user_id: &str, id: &str) -> Result<bool, StoreError> {
        if Self::find_for_user(store, user_id, id).await?.is_none() {
            return Ok(false);
        }
        match store.delete(collections::NOTIFICATIONS, id).await {
            Ok(()) => Ok(true),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn user_filter(user_id: &str, unread_only: bool) -> Filter {
    let filter = Filter::all().eq("user_id", user_id);
    if unread_only {
        filter.eq("is_read", false)
    } else {
        filter
    }
}
