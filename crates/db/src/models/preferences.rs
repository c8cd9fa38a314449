//! Per-user notification preference model and DTOs.

use std::collections::BTreeSet;

use campus_core::audience::AudienceMember;
use campus_core::notification_roles::DEFAULT_SUBSCRIBED_ROLE;
use campus_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A document from the `user_preferences` collection, keyed by `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserNotificationPreferences {
    pub user_id: UserId,
    #[serde(default)]
    pub subscribed_roles: BTreeSet<String>,
    /// Override that delivers every notification regardless of targeting.
    pub allow_all_announcements: bool,
    pub updated_at: Timestamp,
}

impl UserNotificationPreferences {
    /// Preferences a user starts with: subscribed to `general`, override on.
    pub fn defaults(user_id: impl Into<UserId>, now: Timestamp) -> Self {
        Self {
            user_id: user_id.into(),
            subscribed_roles: BTreeSet::from([DEFAULT_SUBSCRIBED_ROLE.to_string()]),
            allow_all_announcements: true,
            updated_at: now,
        }
    }
}

impl AudienceMember for UserNotificationPreferences {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn allows_all(&self) -> bool {
        self.allow_all_announcements
    }

    fn subscribed_roles(&self) -> &BTreeSet<String> {
        &self.subscribed_roles
    }
}

/// DTO for updating preferences. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePreferences {
    pub subscribed_roles: Option<BTreeSet<String>>,
    pub allow_all_announcements: Option<bool>,
}

/// Patch document written to the store.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PreferencePatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed_roles: Option<&'a BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_all_announcements: Option<bool>,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_subscribe_to_general_with_override() {
        let prefs = UserNotificationPreferences::defaults("u1", chrono::Utc::now());
        assert_eq!(prefs.user_id, "u1");
        assert!(prefs.subscribed_roles.contains("general"));
        assert_eq!(prefs.subscribed_roles.len(), 1);
        assert!(prefs.allow_all_announcements);
    }
}
