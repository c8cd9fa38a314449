//! Notification entity models and DTOs.

use campus_core::notifications::NotificationType;
use campus_core::types::{DocId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A document from the `notifications` collection.
///
/// Each recipient owns a private copy; rows are never shared between users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: DocId,
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    /// Id of the announcement or event this is about. For linking only; the
    /// target may since have been deleted.
    pub related_id: Option<DocId>,
    pub is_read: bool,
    pub timestamp: Timestamp,
    pub category: Option<String>,
    pub author_name: Option<String>,
}

impl Notification {
    /// Build an unread notification for `user_id` from a draft. The id is
    /// assigned by the store on insert.
    pub fn from_draft(user_id: impl Into<UserId>, draft: &NotificationDraft, now: Timestamp) -> Self {
        Self {
            id: DocId::new(),
            user_id: user_id.into(),
            title: draft.title.clone(),
            message: draft.message.clone(),
            notification_type: draft.notification_type,
            related_id: draft.related_id.clone(),
            is_read: false,
            timestamp: now,
            category: draft.category.clone(),
            author_name: draft.author_name.clone(),
        }
    }
}

/// Recipient-independent notification content, fanned out to many users.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub related_id: Option<DocId>,
    pub category: Option<String>,
    pub author_name: Option<String>,
}

impl NotificationDraft {
    /// A system notification with no related content.
    pub fn system(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::System,
            title: title.into(),
            message: message.into(),
            related_id: None,
            category: Some("System".to_string()),
            author_name: None,
        }
    }
}

/// Counts plus the most recent notifications for the bell badge.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationSummary {
    pub total: usize,
    pub unread: usize,
    pub recent: Vec<Notification>,
}
