//! Notification role registry.
//!
//! Default roles are seeded at startup and cannot be renamed or deleted.
//! Custom roles are fully managed by admins. Deleting a role is a two-step
//! saga: the role document goes first, then every preference record that
//! still subscribes to it is swept. Between the two steps a preference may
//! name a role that no longer exists; the resolver treats that id as a
//! non-match, and [`RoleRegistry::sweep_role`] can be re-run to finish an
//! interrupted deletion.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use campus_core::error::CoreError;
use campus_core::notification_roles::{
    validate_color, validate_role_description, validate_role_name, DEFAULT_ROLES,
};
use campus_db::models::role::{CreateRole, NotificationRole, UpdateRole};
use campus_db::repositories::{PreferenceRepo, RoleRepo};
use campus_db::{DocumentStore, StoreError};
use chrono::Utc;
use serde::Serialize;

use crate::error::{or_not_found, ServiceResult};

const ENTITY: &str = "Role";

/// Outcome of [`RoleRegistry::delete_role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDeletion {
    pub role_id: String,
    /// Preference records the role was removed from.
    pub pruned_preferences: usize,
}

#[derive(Clone)]
pub struct RoleRegistry {
    store: Arc<dyn DocumentStore>,
}

impl RoleRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Insert every default role that is missing. Returns how many were added.
    pub async fn seed_defaults(&self) -> ServiceResult<usize> {
        let now = Utc::now();
        let mut inserted = 0;
        for default in DEFAULT_ROLES {
            let role = NotificationRole::from_default(default, now);
            if RoleRepo::insert_default(self.store.as_ref(), &role).await? {
                inserted += 1;
            }
        }
        tracing::info!(inserted, "Default notification roles seeded");
        Ok(inserted)
    }

    /// All roles: defaults in their canonical order, then custom roles by
    /// creation time.
    pub async fn list_roles(&self) -> ServiceResult<Vec<NotificationRole>> {
        let mut roles = RoleRepo::list(self.store.as_ref()).await?;
        roles.sort_by(registry_order);
        Ok(roles)
    }

    pub async fn get_role(&self, id: &str) -> ServiceResult<NotificationRole> {
        RoleRepo::find_by_id(self.store.as_ref(), id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id).into())
    }

    /// Create a custom role.
    pub async fn create_role(
        &self,
        input: CreateRole,
        created_by: &str,
    ) -> ServiceResult<NotificationRole> {
        validate_role_name(&input.name)?;
        validate_role_description(&input.description)?;
        validate_color(&input.color)?;

        let role = NotificationRole {
            id: String::new(),
            name: input.name.trim().to_string(),
            description: input.description.trim().to_string(),
            color: input.color,
            is_default: false,
            created_at: Utc::now(),
            created_by: created_by.to_string(),
        };
        let role = RoleRepo::insert(self.store.as_ref(), role).await?;
        tracing::info!(role_id = %role.id, name = %role.name, created_by, "Notification role created");
        Ok(role)
    }

    /// Apply a partial update. Default roles keep their name.
    pub async fn update_role(&self, id: &str, input: UpdateRole) -> ServiceResult<NotificationRole> {
        let current = self.get_role(id).await?;

        let name = input.name.as_deref().map(str::trim);
        if let Some(name) = name {
            if current.is_default && name != current.name {
                return Err(CoreError::ImmutableField(format!(
                    "name of default role '{}'",
                    current.id
                ))
                .into());
            }
            validate_role_name(name)?;
        }
        let description = input.description.as_deref().map(str::trim);
        if let Some(description) = description {
            validate_role_description(description)?;
        }
        if let Some(color) = input.color.as_deref() {
            validate_color(color)?;
        }

        let patch = UpdateRole {
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            color: input.color,
        };
        let role = RoleRepo::update(self.store.as_ref(), id, &patch)
            .await
            .map_err(or_not_found(ENTITY, id))?;
        tracing::info!(role_id = %id, "Notification role updated");
        Ok(role)
    }

    /// Delete a custom role and sweep it from every subscription.
    pub async fn delete_role(&self, id: &str) -> ServiceResult<RoleDeletion> {
        let role = self.get_role(id).await?;
        if role.is_default {
            return Err(CoreError::ImmutableField(format!(
                "default role '{id}' cannot be deleted"
            ))
            .into());
        }

        RoleRepo::delete(self.store.as_ref(), id)
            .await
            .map_err(or_not_found(ENTITY, id))?;

        let pruned = match self.sweep_role(id).await {
            Ok(pruned) => pruned,
            Err(e) => {
                tracing::error!(
                    role_id = %id,
                    error = %e,
                    "Role deleted but subscription sweep failed; re-run the sweep"
                );
                return Err(e);
            }
        };

        tracing::info!(role_id = %id, pruned, "Notification role deleted");
        Ok(RoleDeletion {
            role_id: id.to_string(),
            pruned_preferences: pruned,
        })
    }

    /// Remove `role_id` from every preference record that subscribes to it.
    ///
    /// Idempotent: a second run finds nothing left to prune.
    pub async fn sweep_role(&self, role_id: &str) -> ServiceResult<usize> {
        let subscribed = PreferenceRepo::list_subscribed_to(self.store.as_ref(), role_id).await?;
        let now = Utc::now();
        let mut pruned = 0;
        for mut prefs in subscribed {
            prefs.subscribed_roles.remove(role_id);
            match PreferenceRepo::set_subscribed_roles(
                self.store.as_ref(),
                &prefs.user_id,
                &prefs.subscribed_roles,
                now,
            )
            .await
            {
                Ok(()) => pruned += 1,
                Err(StoreError::NotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(pruned)
    }

    /// Ids of every role currently registered.
    pub async fn role_ids(&self) -> ServiceResult<BTreeSet<String>> {
        Ok(RoleRepo::list(self.store.as_ref())
            .await?
            .into_iter()
            .map(|role| role.id)
            .collect())
    }
}

fn registry_order(a: &NotificationRole, b: &NotificationRole) -> Ordering {
    let rank = |role: &NotificationRole| {
        DEFAULT_ROLES
            .iter()
            .position(|d| role.is_default && d.id == role.id)
            .unwrap_or(DEFAULT_ROLES.len())
    };
    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}
