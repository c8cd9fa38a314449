//! Repository for the `user_preferences` collection.
//!
//! Documents are keyed by `user_id`, so a user has at most one record.

use std::collections::BTreeSet;

use campus_core::types::Timestamp;

use crate::error::StoreError;
use crate::models::preferences::{PreferencePatch, UpdatePreferences, UserNotificationPreferences};
use crate::store::{collections, DocumentStore, Filter};

use super::document;

/// Field holding the subscribed role ids.
const SUBSCRIBED_ROLES: &str = "subscribed_roles";

/// Provides CRUD operations for per-user notification preferences.
pub struct PreferenceRepo;

impl PreferenceRepo {
    pub async fn find(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Option<UserNotificationPreferences>, StoreError> {
        document::find(store, collections::USER_PREFERENCES, user_id).await
    }

    /// Insert a user's first record.
    ///
    /// Fails with [`StoreError::Conflict`] if the user already has one.
    pub async fn insert(
        store: &dyn DocumentStore,
        prefs: &UserNotificationPreferences,
    ) -> Result<(), StoreError> {
        document::insert_with_id(store, collections::USER_PREFERENCES, &prefs.user_id, prefs).await
    }

    /// Apply a partial update, stamping `updated_at`.
    pub async fn update(
        store: &dyn DocumentStore,
        user_id: &str,
        input: &UpdatePreferences,
        now: Timestamp,
    ) -> Result<UserNotificationPreferences, StoreError> {
        let patch = PreferencePatch {
            subscribed_roles: input.subscribed_roles.as_ref(),
            allow_all_announcements: input.allow_all_announcements,
            updated_at: now,
        };
        document::patch(store, collections::USER_PREFERENCES, user_id, &patch).await
    }

    /// Replace a user's subscriptions wholesale.
    pub async fn set_subscribed_roles(
        store: &dyn DocumentStore,
        user_id: &str,
        roles: &BTreeSet<String>,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let patch = PreferencePatch {
            subscribed_roles: Some(roles),
            allow_all_announcements: None,
            updated_at: now,
        };
        store
            .update(
                collections::USER_PREFERENCES,
                user_id,
                serde_json::to_value(&patch)?,
            )
            .await
    }

    pub async fn list_all(
        store: &dyn DocumentStore,
    ) -> Result<Vec<UserNotificationPreferences>, StoreError> {
        document::find_all(store, collections::USER_PREFERENCES, &Filter::all()).await
    }

    /// Every record whose subscriptions include `role_id`.
    pub async fn list_subscribed_to(
        store: &dyn DocumentStore,
        role_id: &str,
    ) -> Result<Vec<UserNotificationPreferences>, StoreError> {
        let filter = Filter::all().contains(SUBSCRIBED_ROLES, role_id);
        document::find_all(store, collections::USER_PREFERENCES, &filter).await
    }
}
