//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and only ever touch
//! the caller's own notifications.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_core::notifications::clamp_limit;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<usize>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<usize>,
}

/// GET /api/v1/notifications
///
/// List the authenticated user's notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<impl IntoResponse> {
    let notifications = state
        .inbox
        .list(
            &auth.user_id,
            params.unread_only.unwrap_or(false),
            clamp_limit(params.limit),
            params.offset.unwrap_or(0),
        )
        .await?;
    Ok(Json(DataResponse { data: notifications }))
}

/// GET /api/v1/notifications/summary
pub async fn summary(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let summary = state.inbox.summary(&auth.user_id).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = state.inbox.unread_count(&auth.user_id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "count": count }),
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Returns 204 No Content on success, or 404 if the notification does not
/// belong to the authenticated user.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.inbox.mark_read(&auth.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
///
/// Returns the number of notifications that were marked.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let marked = state.inbox.mark_all_read(&auth.user_id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "marked": marked }),
    }))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.inbox.delete(&auth.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
