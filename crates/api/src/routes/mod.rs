pub mod announcements;
pub mod events;
pub mod health;
pub mod notifications;
pub mod preferences;
pub mod roles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /roles                            list, create (admin)
/// /roles/{id}                       update, delete (admin)
///
/// /preferences                      get, update (own record)
///
/// /announcements                    feed, create (staff)
/// /announcements/{id}               update, delete (author or admin)
/// /announcements/{id}/pin           toggle pin (author or admin)
///
/// /events                           feed, create (staff)
/// /events/upcoming                  events not yet ended
/// /events/{id}                      update, delete (author or admin)
///
/// /notifications                    list own
/// /notifications/summary            counts + recent
/// /notifications/unread-count       unread badge
/// /notifications/read-all           mark all read
/// /notifications/{id}/read          mark one read
/// /notifications/{id}               delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/roles", roles::router())
        .nest("/preferences", preferences::router())
        .nest("/announcements", announcements::router())
        .nest("/events", events::router())
        .nest("/notifications", notifications::router())
}
