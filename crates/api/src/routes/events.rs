//! Route definitions for the `/events` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /              -> list_events
/// POST   /              -> create_event
/// GET    /upcoming      -> upcoming_events
/// PUT    /{id}          -> update_event
/// DELETE /{id}          -> delete_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route("/upcoming", get(events::upcoming_events))
        .route("/{id}", put(events::update_event).delete(events::delete_event))
}
