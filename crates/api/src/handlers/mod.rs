pub mod announcements;
pub mod events;
pub mod notifications;
pub mod preferences;
pub mod roles;
