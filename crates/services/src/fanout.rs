//! Notification fan-out.
//!
//! [`NotificationFanout`] turns one newly created piece of content into one
//! private notification per recipient. Recipients are resolved against the
//! audience the caller supplies, normally every stored preference record;
//! users who have never had a record created are not notified. Fan-out runs inline, exactly once per creation, and is not
//! idempotent: calling it twice writes duplicates.

use std::sync::Arc;

use campus_core::audience::resolve_recipients;
use campus_db::models::content::Content;
use campus_db::models::notification::{Notification, NotificationDraft};
use campus_db::models::preferences::UserNotificationPreferences;
use campus_db::repositories::NotificationRepo;
use campus_db::DocumentStore;
use chrono::Utc;

use crate::error::ServiceResult;

#[derive(Clone)]
pub struct NotificationFanout {
    store: Arc<dyn DocumentStore>,
}

impl NotificationFanout {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Notify the members of `audience` that `content` targets. Returns the
    /// number of notifications written.
    pub async fn fan_out<C: Content>(
        &self,
        content: &C,
        audience: &[UserNotificationPreferences],
    ) -> ServiceResult<usize> {
        let recipients = resolve_recipients(content.targeting(), audience);
        let draft = content.notification_draft();
        let now = Utc::now();

        for user_id in &recipients {
            let notification = Notification::from_draft(user_id.as_str(), &draft, now);
            NotificationRepo::create(self.store.as_ref(), notification).await?;
        }

        tracing::info!(
            kind = %C::NOTIFICATION_TYPE,
            content_id = %content.id(),
            recipients = recipients.len(),
            "Notifications fanned out"
        );
        Ok(recipients.len())
    }

    /// Write a single `system` notification to one user.
    pub async fn send_system(
        &self,
        user_id: &str,
        title: &str,
        message: &str,
    ) -> ServiceResult<Notification> {
        let draft = NotificationDraft::system(title, message);
        let notification = Notification::from_draft(user_id, &draft, Utc::now());
        let created = NotificationRepo::create(self.store.as_ref(), notification).await?;
        tracing::debug!(user_id, notification_id = %created.id, "System notification sent");
        Ok(created)
    }
}
