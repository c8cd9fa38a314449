//! Per-user notification preferences.

use std::collections::BTreeSet;
use std::sync::Arc;

use campus_core::audience::ensure_known_roles;
use campus_core::error::CoreError;
use campus_core::notification_roles::DEFAULT_SUBSCRIBED_ROLE;
use campus_db::models::preferences::{UpdatePreferences, UserNotificationPreferences};
use campus_db::repositories::PreferenceRepo;
use campus_db::{DocumentStore, StoreError};
use chrono::Utc;

use crate::error::{or_not_found, ServiceResult};
use crate::fanout::NotificationFanout;
use crate::registry::RoleRegistry;

const ENTITY: &str = "Preferences";

/// Title of the system notification sent when a user's preferences are
/// first created.
pub const WELCOME_TITLE: &str = "Welcome to Campus Hub";
pub const WELCOME_MESSAGE: &str =
    "You are subscribed to general announcements. Pick more notification roles in your preferences.";

#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn DocumentStore>,
    registry: RoleRegistry,
    fanout: NotificationFanout,
}

impl PreferenceService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        registry: RoleRegistry,
        fanout: NotificationFanout,
    ) -> Self {
        Self {
            store,
            registry,
            fanout,
        }
    }

    /// Fetch a user's preferences, creating the defaults on first access.
    pub async fn get(&self, user_id: &str) -> ServiceResult<UserNotificationPreferences> {
        if let Some(prefs) = PreferenceRepo::find(self.store.as_ref(), user_id).await? {
            return Ok(prefs);
        }

        let defaults = UserNotificationPreferences::defaults(user_id, Utc::now());
        match PreferenceRepo::insert(self.store.as_ref(), &defaults).await {
            Ok(()) => {
                tracing::info!(user_id, "Default notification preferences created");
                if let Err(e) = self
                    .fanout
                    .send_system(user_id, WELCOME_TITLE, WELCOME_MESSAGE)
                    .await
                {
                    tracing::error!(user_id, error = %e, "Failed to send welcome notification");
                }
                Ok(defaults)
            }
            // Lost a first-access race; the winner's record stands.
            Err(StoreError::Conflict { .. }) => PreferenceRepo::find(self.store.as_ref(), user_id)
                .await?
                .ok_or_else(|| CoreError::not_found(ENTITY, user_id).into()),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a partial update. Every subscribed role id must exist.
    pub async fn update(
        &self,
        user_id: &str,
        input: UpdatePreferences,
    ) -> ServiceResult<UserNotificationPreferences> {
        if let Some(roles) = &input.subscribed_roles {
            let known = self.registry.role_ids().await?;
            ensure_known_roles(roles, &known)?;
        }

        // Make sure a record exists to patch.
        self.get(user_id).await?;

        let prefs = PreferenceRepo::update(self.store.as_ref(), user_id, &input, Utc::now())
            .await
            .map_err(or_not_found(ENTITY, user_id))?;
        tracing::info!(
            user_id,
            subscribed = prefs.subscribed_roles.len(),
            allow_all = prefs.allow_all_announcements,
            "Notification preferences updated"
        );
        Ok(prefs)
    }

    /// Every stored preference record.
    pub async fn list_all(&self) -> ServiceResult<Vec<UserNotificationPreferences>> {
        Ok(PreferenceRepo::list_all(self.store.as_ref()).await?)
    }

    /// The roles a viewer sees content for. Users without a record get the
    /// default subscription without one being written.
    pub async fn subscribed_roles(&self, user_id: &str) -> ServiceResult<BTreeSet<String>> {
        Ok(PreferenceRepo::find(self.store.as_ref(), user_id)
            .await?
            .map(|prefs| prefs.subscribed_roles)
            .unwrap_or_else(|| BTreeSet::from([DEFAULT_SUBSCRIBED_ROLE.to_string()])))
    }
}
