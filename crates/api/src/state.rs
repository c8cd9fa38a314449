use std::sync::Arc;

use campus_db::DocumentStore;
use campus_services::{
    ContentService, NotificationFanout, NotificationInbox, PreferenceService, RoleRegistry,
};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Document store backing every service.
    pub store: Arc<dyn DocumentStore>,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    pub roles: RoleRegistry,
    pub preferences: PreferenceService,
    pub content: ContentService,
    pub inbox: NotificationInbox,
}

impl AppState {
    /// Wire every service onto one store.
    pub fn new(store: Arc<dyn DocumentStore>, config: ServerConfig) -> Self {
        let roles = RoleRegistry::new(Arc::clone(&store));
        let fanout = NotificationFanout::new(Arc::clone(&store));
        let preferences =
            PreferenceService::new(Arc::clone(&store), roles.clone(), fanout.clone());
        let content = ContentService::new(
            Arc::clone(&store),
            roles.clone(),
            preferences.clone(),
            fanout,
        );
        let inbox = NotificationInbox::new(Arc::clone(&store));

        Self {
            store,
            config: Arc::new(config),
            roles,
            preferences,
            content,
            inbox,
        }
    }
}
