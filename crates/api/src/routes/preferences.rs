//! Route definitions for the `/preferences` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::preferences;
use crate::state::AppState;

/// Routes mounted at `/preferences`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(preferences::get_preferences).put(preferences::update_preferences),
    )
}
