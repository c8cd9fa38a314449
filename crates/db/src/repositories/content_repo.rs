//! Repository for targetable content (`announcements` and `events`).

use serde::Serialize;

use crate::error::StoreError;
use crate::models::announcement::{Announcement, PinPatch};
use crate::models::content::Content;
use crate::store::{collections, DocumentStore, Filter};

use super::document;

/// Provides CRUD operations for any [`Content`] type, addressed through its
/// collection.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a new item under a fresh id, returning the stored item.
    pub async fn insert<C: Content>(store: &dyn DocumentStore, mut item: C) -> Result<C, StoreError> {
        let id = document::insert(store, C::COLLECTION, &item).await?;
        item.set_id(id);
        Ok(item)
    }

    pub async fn find<C: Content>(store: &dyn DocumentStore, id: &str) -> Result<Option<C>, StoreError> {
        document::find(store, C::COLLECTION, id).await
    }

    /// List every item in insertion order. Callers apply feed ordering.
    pub async fn list<C: Content>(store: &dyn DocumentStore) -> Result<Vec<C>, StoreError> {
        document::find_all(store, C::COLLECTION, &Filter::all()).await
    }

    /// Apply a partial update and return the updated item.
    pub async fn update<C, P>(store: &dyn DocumentStore, id: &str, patch: &P) -> Result<C, StoreError>
    where
        C: Content,
        P: Serialize + ?Sized,
    {
        document::patch(store, C::COLLECTION, id, patch).await
    }

    pub async fn delete<C: Content>(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
        store.delete(C::COLLECTION, id).await
    }

    /// Set an announcement's pin flag.
    pub async fn set_pinned(
        store: &dyn DocumentStore,
        id: &str,
        is_pinned: bool,
    ) -> Result<Announcement, StoreError> {
        document::patch(store, collections::ANNOUNCEMENTS, id, &PinPatch { is_pinned }).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use campus_core::audience::Targeting;
    use campus_core::roles::{AccountRole, Viewer};
    use chrono::Utc;

    use super::*;
    use crate::models::announcement::{CreateAnnouncement, UpdateAnnouncement};
    use crate::models::event::{CreateEvent, Event};
    use crate::store::MemoryStore;

    fn teacher() -> Viewer {
        Viewer::new("t1", AccountRole::Teacher)
    }

    fn announcement(title: &str) -> Announcement {
        CreateAnnouncement {
            title: title.to_string(),
            content: "Body".into(),
            category: None,
            author_name: Some("Dr. Martinez".into()),
            author_photo_url: None,
            attachments: Vec::new(),
            targeting: Targeting::public(),
            start_time: None,
            end_time: None,
        }
        .into_announcement(&teacher(), Utc::now())
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = MemoryStore::new();
        let created = ContentRepo::insert(&store, announcement("Exams")).await.unwrap();
        assert!(!created.id.is_empty());

        let found: Option<Announcement> = ContentRepo::find(&store, &created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn collections_are_separate() {
        let store = MemoryStore::new();
        ContentRepo::insert(&store, announcement("Exams")).await.unwrap();

        let event = CreateEvent {
            title: "Career Fair".into(),
            description: String::new(),
            start_time: None,
            end_time: None,
            location: "Main Hall".into(),
            event_type: "Career".into(),
            organizer: "Careers Office".into(),
            attendees: None,
            attachments: Vec::new(),
            targeting: Targeting::public(),
        }
        .into_event(&teacher(), Utc::now());
        ContentRepo::insert(&store, event).await.unwrap();

        assert_eq!(ContentRepo::list::<Announcement>(&store).await.unwrap().len(), 1);
        assert_eq!(ContentRepo::list::<Event>(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_and_pin() {
        let store = MemoryStore::new();
        let created = ContentRepo::insert(&store, announcement("Exams")).await.unwrap();

        let patch = UpdateAnnouncement {
            title: Some("Exams moved".into()),
            ..Default::default()
        };
        let updated: Announcement = ContentRepo::update::<Announcement, _>(&store, &created.id, &patch)
            .await
            .unwrap();
        assert_eq!(updated.title, "Exams moved");
        assert_eq!(updated.author_id, "t1");

        let pinned = ContentRepo::set_pinned(&store, &created.id, true).await.unwrap();
        assert!(pinned.is_pinned);
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let store = MemoryStore::new();
        let created = ContentRepo::insert(&store, announcement("Exams")).await.unwrap();
        ContentRepo::delete::<Announcement>(&store, &created.id).await.unwrap();
        assert_matches!(
            ContentRepo::delete::<Announcement>(&store, &created.id).await,
            Err(StoreError::NotFound { .. })
        );
    }
}
