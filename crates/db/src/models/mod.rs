pub mod announcement;
pub mod attachment;
pub mod content;
pub mod event;
pub mod notification;
pub mod preferences;
pub mod role;
