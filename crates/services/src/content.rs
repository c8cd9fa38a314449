//! Announcements and events: authorization, validation, feeds and fan-out.
//!
//! Both content kinds share one code path through the [`Content`] trait.
//! Creating an item notifies its audience once; edits never re-notify.

use std::sync::Arc;

use campus_core::audience::{is_visible, validate_known_roles, validate_targeting, Targeting};
use campus_core::error::CoreError;
use campus_core::roles::Viewer;
use campus_core::types::Timestamp;
use campus_db::models::announcement::{feed_order, Announcement, CreateAnnouncement, UpdateAnnouncement};
use campus_db::models::content::Content;
use campus_db::models::event::{calendar_order, CreateEvent, Event, UpdateEvent};
use campus_db::repositories::ContentRepo;
use campus_db::DocumentStore;
use chrono::Utc;
use serde::Serialize;

use crate::error::{or_not_found, ServiceResult};
use crate::fanout::NotificationFanout;
use crate::preferences::PreferenceService;
use crate::registry::RoleRegistry;

#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn DocumentStore>,
    registry: RoleRegistry,
    preferences: PreferenceService,
    fanout: NotificationFanout,
}

impl ContentService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        registry: RoleRegistry,
        preferences: PreferenceService,
        fanout: NotificationFanout,
    ) -> Self {
        Self {
            store,
            registry,
            preferences,
            fanout,
        }
    }

    // -----------------------------------------------------------------------
    // Announcements
    // -----------------------------------------------------------------------

    pub async fn create_announcement(
        &self,
        viewer: &Viewer,
        input: CreateAnnouncement,
    ) -> ServiceResult<Announcement> {
        viewer.ensure_can_publish()?;
        let announcement = input.into_announcement(viewer, Utc::now());
        validate_title(&announcement.title)?;
        self.create(announcement).await
    }

    pub async fn update_announcement(
        &self,
        viewer: &Viewer,
        id: &str,
        mut patch: UpdateAnnouncement,
    ) -> ServiceResult<Announcement> {
        let current: Announcement = self.load_for_edit(viewer, id).await?;
        normalize_title(&mut patch.title)?;
        self.validate_patched_audience(
            &patch.merged_targeting(&current.targeting),
            patch.target_roles.is_some(),
        )
        .await?;
        self.update(id, &patch).await
    }

    pub async fn delete_announcement(&self, viewer: &Viewer, id: &str) -> ServiceResult<()> {
        self.delete::<Announcement>(viewer, id).await
    }

    /// Flip an announcement's pin flag.
    pub async fn toggle_pin(&self, viewer: &Viewer, id: &str) -> ServiceResult<Announcement> {
        let current: Announcement = self.load_for_edit(viewer, id).await?;
        let updated = ContentRepo::set_pinned(self.store.as_ref(), id, !current.is_pinned)
            .await
            .map_err(or_not_found(Announcement::ENTITY, id))?;
        tracing::info!(announcement_id = %id, pinned = updated.is_pinned, "Announcement pin toggled");
        Ok(updated)
    }

    /// Every announcement, pinned first and then newest first.
    pub async fn list_announcements(&self) -> ServiceResult<Vec<Announcement>> {
        let mut items: Vec<Announcement> = ContentRepo::list(self.store.as_ref()).await?;
        items.sort_by(feed_order);
        Ok(items)
    }

    /// The announcement feed as `viewer` sees it.
    pub async fn visible_announcements(&self, viewer: &Viewer) -> ServiceResult<Vec<Announcement>> {
        let items = self.list_announcements().await?;
        self.filter_visible(viewer, items).await
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    pub async fn create_event(&self, viewer: &Viewer, input: CreateEvent) -> ServiceResult<Event> {
        viewer.ensure_can_publish()?;
        let event = input.into_event(viewer, Utc::now());
        validate_title(&event.title)?;
        self.create(event).await
    }

    pub async fn update_event(
        &self,
        viewer: &Viewer,
        id: &str,
        mut patch: UpdateEvent,
    ) -> ServiceResult<Event> {
        let current: Event = self.load_for_edit(viewer, id).await?;
        normalize_title(&mut patch.title)?;
        self.validate_patched_audience(
            &patch.merged_targeting(&current.targeting),
            patch.target_roles.is_some(),
        )
        .await?;
        self.update(id, &patch).await
    }

    pub async fn delete_event(&self, viewer: &Viewer, id: &str) -> ServiceResult<()> {
        self.delete::<Event>(viewer, id).await
    }

    /// Every event by start time; unscheduled events last.
    pub async fn list_events(&self) -> ServiceResult<Vec<Event>> {
        let mut items: Vec<Event> = ContentRepo::list(self.store.as_ref()).await?;
        items.sort_by(calendar_order);
        Ok(items)
    }

    pub async fn visible_events(&self, viewer: &Viewer) -> ServiceResult<Vec<Event>> {
        let items = self.list_events().await?;
        self.filter_visible(viewer, items).await
    }

    /// Visible events that have not yet ended at `now`.
    pub async fn upcoming_events(&self, viewer: &Viewer, now: Timestamp) -> ServiceResult<Vec<Event>> {
        let mut items = self.visible_events(viewer).await?;
        items.retain(|event| event.is_upcoming(now));
        Ok(items)
    }

    // -----------------------------------------------------------------------
    // Shared
    // -----------------------------------------------------------------------

    async fn create<C: Content>(&self, item: C) -> ServiceResult<C> {
        self.validate_audience(item.targeting()).await?;

        let created = ContentRepo::insert(self.store.as_ref(), item).await?;
        tracing::info!(
            kind = C::ENTITY,
            content_id = %created.id(),
            author_id = %created.author_id(),
            is_public = created.targeting().is_public,
            "Content created"
        );

        if let Err(e) = self.notify_audience(&created).await {
            tracing::error!(
                kind = C::ENTITY,
                content_id = %created.id(),
                error = %e,
                "Notification fan-out failed"
            );
        }
        Ok(created)
    }

    /// Fan `item` out to every user with a preference record.
    async fn notify_audience<C: Content>(&self, item: &C) -> ServiceResult<usize> {
        let audience = self.preferences.list_all().await?;
        self.fanout.fan_out(item, &audience).await
    }

    async fn update<C, P>(&self, id: &str, patch: &P) -> ServiceResult<C>
    where
        C: Content,
        P: Serialize,
    {
        let updated: C = ContentRepo::update(self.store.as_ref(), id, patch)
            .await
            .map_err(or_not_found(C::ENTITY, id))?;
        tracing::info!(kind = C::ENTITY, content_id = %id, "Content updated");
        Ok(updated)
    }

    async fn delete<C: Content>(&self, viewer: &Viewer, id: &str) -> ServiceResult<()> {
        self.load_for_edit::<C>(viewer, id).await?;
        ContentRepo::delete::<C>(self.store.as_ref(), id)
            .await
            .map_err(or_not_found(C::ENTITY, id))?;
        tracing::info!(kind = C::ENTITY, content_id = %id, deleted_by = %viewer.user_id, "Content deleted");
        Ok(())
    }

    /// Fetch an item and check `viewer` may change it.
    async fn load_for_edit<C: Content>(&self, viewer: &Viewer, id: &str) -> ServiceResult<C> {
        let item: C = ContentRepo::find(self.store.as_ref(), id)
            .await?
            .ok_or_else(|| CoreError::not_found(C::ENTITY, id))?;
        viewer.ensure_can_modify(item.author_id())?;
        Ok(item)
    }

    async fn validate_audience(&self, targeting: &Targeting) -> ServiceResult<()> {
        validate_targeting(targeting)?;
        self.ensure_roles_registered(targeting).await
    }

    /// Stored role ids may name roles deleted since the item was written, so
    /// the registry is only consulted when the patch supplies a new role set.
    async fn validate_patched_audience(
        &self,
        merged: &Targeting,
        roles_replaced: bool,
    ) -> ServiceResult<()> {
        validate_targeting(merged)?;
        if roles_replaced {
            self.ensure_roles_registered(merged).await?;
        }
        Ok(())
    }

    async fn ensure_roles_registered(&self, targeting: &Targeting) -> ServiceResult<()> {
        if !targeting.is_public {
            let known = self.registry.role_ids().await?;
            validate_known_roles(targeting, &known)?;
        }
        Ok(())
    }

    async fn filter_visible<C: Content>(&self, viewer: &Viewer, items: Vec<C>) -> ServiceResult<Vec<C>> {
        if viewer.is_staff() {
            return Ok(items);
        }
        let roles = self.preferences.subscribed_roles(&viewer.user_id).await?;
        Ok(items.into_iter().filter(|item| is_visible(item, &roles)).collect())
    }
}

fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    Ok(())
}

/// Trim a patched title in place and reject it if nothing is left.
fn normalize_title(title: &mut Option<String>) -> Result<(), CoreError> {
    if let Some(title) = title.as_mut() {
        *title = title.trim().to_string();
        validate_title(title)?;
    }
    Ok(())
}
