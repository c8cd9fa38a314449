//! Notification type names, titles, and paging limits.
//!
//! Shared by the fan-out service, the inbox, and the HTTP handlers.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of notifications included in a summary's `recent` list.
pub const RECENT_SUMMARY_LIMIT: usize = 5;

/// Default page size for notification listing.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Maximum page size for notification listing.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Title of the notification sent when an announcement is published.
pub const ANNOUNCEMENT_TITLE: &str = "New Announcement";

/// Title of the notification sent when an event is published.
pub const EVENT_TITLE: &str = "New Event";

// ---------------------------------------------------------------------------
// NotificationType
// ---------------------------------------------------------------------------

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Announcement,
    Event,
    System,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Announcement => "announcement",
            Self::Event => "event",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp a requested page size to `1..=MAX_PAGE_LIMIT`, defaulting to
/// [`DEFAULT_PAGE_LIMIT`].
pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_defaults_and_caps() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10)), 10);
        assert_eq!(clamp_limit(Some(10_000)), MAX_PAGE_LIMIT);
    }

    #[test]
    fn notification_type_serializes_lowercase() {
        let json = serde_json::to_value(NotificationType::Event).unwrap();
        assert_eq!(json, "event");
        let parsed: NotificationType = serde_json::from_value("system".into()).unwrap();
        assert_eq!(parsed, NotificationType::System);
    }
}
