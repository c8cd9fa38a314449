//! Handlers for the `/events` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_db::models::event::{CreateEvent, UpdateEvent};
use chrono::Utc;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events
pub async fn list_events(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = state.content.visible_events(&auth.viewer()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/events/upcoming
pub async fn upcoming_events(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = state
        .content
        .upcoming_events(&auth.viewer(), Utc::now())
        .await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/events
pub async fn create_event(
    RequireStaff(auth): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    let created = state.content.create_event(&auth.viewer(), input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/events/{id}
pub async fn update_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateEvent>,
) -> AppResult<impl IntoResponse> {
    let updated = state.content.update_event(&auth.viewer(), &id, patch).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/events/{id}
pub async fn delete_event(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.content.delete_event(&auth.viewer(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
