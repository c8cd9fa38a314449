//! Typed repositories over the [`DocumentStore`](crate::store::DocumentStore).
//!
//! Each repository is a zero-sized struct with associated async functions
//! taking the store as the first argument, so services can share one
//! `Arc<dyn DocumentStore>` without holding repository state.

mod document;

pub mod content_repo;
pub mod notification_repo;
pub mod preference_repo;
pub mod role_repo;

pub use content_repo::ContentRepo;
pub use notification_repo::NotificationRepo;
pub use preference_repo::PreferenceRepo;
pub use role_repo::RoleRepo;
