//! Announcement entity model and DTOs.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use campus_core::audience::{Targetable, Targeting};
use campus_core::notifications::{NotificationType, ANNOUNCEMENT_TITLE};
use campus_core::roles::{AccountRole, Viewer};
use campus_core::types::{DocId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::attachment::FileAttachment;
use super::content::Content;
use super::notification::NotificationDraft;
use crate::store::collections;

/// Author name used when the publisher supplies none.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// A document from the `announcements` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: DocId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub author_name: String,
    pub author_photo_url: Option<String>,
    pub timestamp: Timestamp,
    pub is_pinned: bool,
    pub category: Option<String>,
    pub author_role: AccountRole,
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,
    #[serde(flatten)]
    pub targeting: Targeting,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

impl Targetable for Announcement {
    fn targeting(&self) -> &Targeting {
        &self.targeting
    }
}

impl Content for Announcement {
    const COLLECTION: &'static str = collections::ANNOUNCEMENTS;
    const ENTITY: &'static str = "Announcement";
    const NOTIFICATION_TYPE: NotificationType = NotificationType::Announcement;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn author_id(&self) -> &str {
        &self.author_id
    }

    fn notification_draft(&self) -> NotificationDraft {
        NotificationDraft {
            notification_type: Self::NOTIFICATION_TYPE,
            title: ANNOUNCEMENT_TITLE.to_string(),
            message: self.title.clone(),
            related_id: Some(self.id.clone()),
            category: self.category.clone(),
            author_name: Some(self.author_name.clone()),
        }
    }
}

/// Feed order: pinned first, then newest first.
pub fn feed_order(a: &Announcement, b: &Announcement) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

/// DTO for publishing an announcement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnouncement {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub author_name: Option<String>,
    pub author_photo_url: Option<String>,
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,
    #[serde(flatten)]
    pub targeting: Targeting,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

impl CreateAnnouncement {
    /// Build the unpinned document published by `author`. The id is assigned
    /// by the store on insert.
    pub fn into_announcement(self, author: &Viewer, now: Timestamp) -> Announcement {
        Announcement {
            id: DocId::new(),
            title: self.title.trim().to_string(),
            content: self.content,
            author_id: author.user_id.clone(),
            author_name: self
                .author_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
            author_photo_url: self.author_photo_url,
            timestamp: now,
            is_pinned: false,
            category: self.category,
            author_role: author.role,
            attachments: self.attachments,
            targeting: self.targeting,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// DTO for editing an announcement. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAnnouncement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<FileAttachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_roles: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
}

impl UpdateAnnouncement {
    /// The targeting `current` would have after this patch is applied.
    pub fn merged_targeting(&self, current: &Targeting) -> Targeting {
        Targeting {
            is_public: self.is_public.unwrap_or(current.is_public),
            target_roles: self
                .target_roles
                .clone()
                .unwrap_or_else(|| current.target_roles.clone()),
        }
    }
}

/// Patch that flips the pin flag.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PinPatch {
    pub is_pinned: bool,
}
