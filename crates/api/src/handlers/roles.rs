//! Handlers for the `/roles` resource.
//!
//! Any authenticated user may list roles; changes are admin only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use campus_db::models::role::{CreateRole, UpdateRole};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/roles
pub async fn list_roles(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let roles = state.roles.list_roles().await?;
    Ok(Json(DataResponse { data: roles }))
}

/// POST /api/v1/roles
pub async fn create_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateRole>,
) -> AppResult<impl IntoResponse> {
    let role = state.roles.create_role(input, &admin.user_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: role })))
}

/// PUT /api/v1/roles/{id}
///
/// Default roles accept color and description changes but keep their name.
pub async fn update_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateRole>,
) -> AppResult<impl IntoResponse> {
    let role = state.roles.update_role(&id, input).await?;
    Ok(Json(DataResponse { data: role }))
}

/// DELETE /api/v1/roles/{id}
///
/// Returns how many preference records the role was swept from.
pub async fn delete_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deletion = state.roles.delete_role(&id).await?;
    tracing::info!(role_id = %id, deleted_by = %admin.user_id, "Role deleted via API");
    Ok(Json(DataResponse { data: deletion }))
}
