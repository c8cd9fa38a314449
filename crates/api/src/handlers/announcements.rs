//! Handlers for the `/announcements` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_db::models::announcement::{CreateAnnouncement, UpdateAnnouncement};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/announcements
///
/// The caller's feed: pinned first, then newest first, filtered to what the
/// caller's subscriptions can see.
pub async fn list_announcements(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = state.content.visible_announcements(&auth.viewer()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/announcements
pub async fn create_announcement(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateAnnouncement>,
) -> AppResult<impl IntoResponse> {
    let created = state
        .content
        .create_announcement(&auth.viewer(), input)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/announcements/{id}
pub async fn update_announcement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateAnnouncement>,
) -> AppResult<impl IntoResponse> {
    let updated = state
        .content
        .update_announcement(&auth.viewer(), &id, patch)
        .await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/announcements/{id}
pub async fn delete_announcement(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.content.delete_announcement(&auth.viewer(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/announcements/{id}/pin
///
/// Flips the pin flag and returns the updated announcement.
pub async fn toggle_pin(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let updated = state.content.toggle_pin(&auth.viewer(), &id).await?;
    Ok(Json(DataResponse { data: updated }))
}
