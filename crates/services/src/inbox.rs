//! A user's own notifications.
//!
//! Every operation is scoped to the calling user. Another user's
//! notification behaves exactly like a missing one.

use std::sync::Arc;

use campus_core::error::CoreError;
use campus_core::notifications::RECENT_SUMMARY_LIMIT;
use campus_db::models::notification::{Notification, NotificationSummary};
use campus_db::repositories::NotificationRepo;
use campus_db::DocumentStore;

use crate::error::ServiceResult;

const ENTITY: &str = "Notification";

#[derive(Clone)]
pub struct NotificationInbox {
    store: Arc<dyn DocumentStore>,
}

impl NotificationInbox {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Newest first.
    pub async fn list(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: usize,
        offset: usize,
    ) -> ServiceResult<Vec<Notification>> {
        Ok(NotificationRepo::list_for_user(self.store.as_ref(), user_id, unread_only, limit, offset).await?)
    }

    /// Counts plus the few most recent notifications.
    pub async fn summary(&self, user_id: &str) -> ServiceResult<NotificationSummary> {
        let store = self.store.as_ref();
        Ok(NotificationSummary {
            total: NotificationRepo::count_for_user(store, user_id).await?,
            unread: NotificationRepo::unread_count(store, user_id).await?,
            recent: NotificationRepo::list_for_user(store, user_id, false, RECENT_SUMMARY_LIMIT, 0)
                .await?,
        })
    }

    pub async fn unread_count(&self, user_id: &str) -> ServiceResult<usize> {
        Ok(NotificationRepo::unread_count(self.store.as_ref(), user_id).await?)
    }

    /// Mark one notification read. Already-read notifications are left as is.
    pub async fn mark_read(&self, user_id: &str, id: &str) -> ServiceResult<()> {
        if NotificationRepo::mark_read(self.store.as_ref(), user_id, id).await? {
            Ok(())
        } else {
            Err(CoreError::not_found(ENTITY, id).into())
        }
    }

    /// Returns how many notifications were marked.
    pub async fn mark_all_read(&self, user_id: &str) -> ServiceResult<u64> {
        let marked = NotificationRepo::mark_all_read(self.store.as_ref(), user_id).await?;
        tracing::debug!(user_id, marked, "Notifications marked read");
        Ok(marked)
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> ServiceResult<()> {
        if NotificationRepo::delete(self.store.as_ref(), user_id, id).await? {
            Ok(())
        } else {
            Err(CoreError::not_found(ENTITY, id).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use campus_db::MemoryStore;

    use super::*;
    use crate::error::ServiceError;
    use crate::fanout::NotificationFanout;

    async fn setup(count: usize) -> (NotificationInbox, Vec<Notification>) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let fanout = NotificationFanout::new(store.clone());
        let mut sent = Vec::new();
        for i in 0..count {
            sent.push(fanout.send_system("u1", "Note", &format!("message {i}")).await.unwrap());
        }
        fanout.send_system("u2", "Note", "someone else").await.unwrap();
        (NotificationInbox::new(store), sent)
    }

    #[tokio::test]
    async fn summary_caps_recent() {
        let (inbox, sent) = setup(7).await;
        inbox.mark_read("u1", &sent[0].id).await.unwrap();

        let summary = inbox.summary("u1").await.unwrap();
        assert_eq!(summary.total, 7);
        assert_eq!(summary.unread, 6);
        assert_eq!(summary.recent.len(), RECENT_SUMMARY_LIMIT);
        assert!(summary.recent.iter().all(|n| n.user_id == "u1"));
    }

    #[tokio::test]
    async fn mark_read_is_one_way_and_idempotent() {
        let (inbox, sent) = setup(1).await;
        inbox.mark_read("u1", &sent[0].id).await.unwrap();
        inbox.mark_read("u1", &sent[0].id).await.unwrap();
        assert_eq!(inbox.unread_count("u1").await.unwrap(), 0);
        assert!(inbox.list("u1", true, 10, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn other_users_notifications_are_not_found() {
        let (inbox, sent) = setup(1).await;
        assert_matches!(
            inbox.mark_read("u2", &sent[0].id).await,
            Err(ServiceError::Core(CoreError::NotFound { .. }))
        );
        assert_matches!(
            inbox.delete("u2", &sent[0].id).await,
            Err(ServiceError::Core(CoreError::NotFound { .. }))
        );
        assert_eq!(inbox.unread_count("u1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn mark_all_read_and_delete() {
        let (inbox, sent) = setup(3).await;
        assert_eq!(inbox.mark_all_read("u1").await.unwrap(), 3);
        assert_eq!(inbox.mark_all_read("u1").await.unwrap(), 0);
        assert_eq!(inbox.unread_count("u2").await.unwrap(), 1);

        inbox.delete("u1", &sent[1].id).await.unwrap();
        assert_matches!(
            inbox.delete("u1", &sent[1].id).await,
            Err(ServiceError::Core(CoreError::NotFound { .. }))
        );
        assert_eq!(inbox.list("u1", false, 10, 0).await.unwrap().len(), 2);
    }
}
