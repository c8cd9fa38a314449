//! Notification role entity model and DTOs.

use campus_core::notification_roles::{DefaultRole, SYSTEM_CREATOR};
use campus_core::types::{DocId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A document from the `roles` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRole {
    pub id: DocId,
    pub name: String,
    pub description: String,
    /// `#RRGGBB` display color.
    pub color: String,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub created_by: UserId,
}

impl NotificationRole {
    /// Build the document for a seeded default role.
    pub fn from_default(role: &DefaultRole, now: Timestamp) -> Self {
        Self {
            id: role.id.to_string(),
            name: role.name.to_string(),
            description: role.description.to_string(),
            color: role.color.to_string(),
            is_default: true,
            created_at: now,
            created_by: SYSTEM_CREATOR.to_string(),
        }
    }
}

/// DTO for creating a custom role.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRole {
    pub name: String,
    pub description: String,
    pub color: String,
}

/// DTO for updating a role. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRole {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
