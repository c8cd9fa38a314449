//! Route definitions for the `/announcements` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::announcements;
use crate::state::AppState;

/// Routes mounted at `/announcements`.
///
/// ```text
/// GET    /              -> list_announcements
/// POST   /              -> create_announcement
/// PUT    /{id}          -> update_announcement
/// DELETE /{id}          -> delete_announcement
/// POST   /{id}/pin      -> toggle_pin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        .route(
            "/{id}",
            put(announcements::update_announcement).delete(announcements::delete_announcement),
        )
        .route("/{id}/pin", post(announcements::toggle_pin))
}
