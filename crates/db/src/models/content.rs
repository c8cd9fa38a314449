//! The shared shape of targetable content (announcements and events).

use campus_core::audience::Targetable;
use campus_core::notifications::NotificationType;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::notification::NotificationDraft;

/// A persisted item that carries [`Targeting`](campus_core::audience::Targeting)
/// and triggers notifications when created.
pub trait Content: Targetable + Serialize + DeserializeOwned + Send + Sync {
    /// Collection the item is stored in.
    const COLLECTION: &'static str;
    /// Entity name used in not-found errors and logs.
    const ENTITY: &'static str;
    /// Type stamped on notifications fanned out for this item.
    const NOTIFICATION_TYPE: NotificationType;

    fn id(&self) -> &str;

    /// Record the id assigned by the store on insert.
    fn set_id(&mut self, id: String);

    /// Whoever may edit or delete the item besides an admin.
    fn author_id(&self) -> &str;

    /// Notification content sent to every recipient when the item is created.
    fn notification_draft(&self) -> NotificationDraft;
}
