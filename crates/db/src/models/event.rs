//! Event entity model and DTOs.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use campus_core::audience::{Targetable, Targeting};
use campus_core::notifications::{NotificationType, EVENT_TITLE};
use campus_core::roles::Viewer;
use campus_core::types::{DocId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::attachment::FileAttachment;
use super::content::Content;
use super::notification::NotificationDraft;
use crate::store::collections;

/// A document from the `events` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: DocId,
    pub title: String,
    pub description: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub location: String,
    pub event_type: String,
    pub organizer: String,
    pub attendees: Option<u32>,
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,
    #[serde(flatten)]
    pub targeting: Targeting,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

impl Event {
    /// An event is upcoming until it ends. Open-ended events fall back to the
    /// start time; events with no schedule at all are always upcoming.
    pub fn is_upcoming(&self, now: Timestamp) -> bool {
        match self.end_time.or(self.start_time) {
            Some(t) => t >= now,
            None => true,
        }
    }
}

impl Targetable for Event {
    fn targeting(&self) -> &Targeting {
        &self.targeting
    }
}

impl Content for Event {
    const COLLECTION: &'static str = collections::EVENTS;
    const ENTITY: &'static str = "Event";
    const NOTIFICATION_TYPE: NotificationType = NotificationType::Event;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn author_id(&self) -> &str {
        &self.created_by
    }

    fn notification_draft(&self) -> NotificationDraft {
        NotificationDraft {
            notification_type: Self::NOTIFICATION_TYPE,
            title: EVENT_TITLE.to_string(),
            message: self.title.clone(),
            related_id: Some(self.id.clone()),
            category: Some(self.event_type.clone()),
            author_name: Some(self.organizer.clone()),
        }
    }
}

/// Calendar order: earliest start first, unscheduled events last.
pub fn calendar_order(a: &Event, b: &Event) -> Ordering {
    match (a.start_time, b.start_time) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// DTO for creating an event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    #[serde(default)]
    pub location: String,
    pub event_type: String,
    pub organizer: String,
    pub attendees: Option<u32>,
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,
    #[serde(flatten)]
    pub targeting: Targeting,
}

impl CreateEvent {
    pub fn into_event(self, creator: &Viewer, now: Timestamp) -> Event {
        Event {
            id: DocId::new(),
            title: self.title.trim().to_string(),
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            event_type: self.event_type,
            organizer: self.organizer,
            attendees: self.attendees,
            attachments: self.attachments,
            targeting: self.targeting,
            created_by: creator.user_id.clone(),
            created_at: now,
        }
    }
}

/// DTO for editing an event. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<FileAttachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_roles: Option<BTreeSet<String>>,
}

impl UpdateEvent {
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
