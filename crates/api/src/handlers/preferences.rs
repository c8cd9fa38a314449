//! Handlers for the caller's own notification preferences.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use campus_db::models::preferences::UpdatePreferences;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/preferences
///
/// Creates the default preferences on first access.
pub async fn get_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let prefs = state.preferences.get(&auth.user_id).await?;
    Ok(Json(DataResponse { data: prefs }))
}

/// PUT /api/v1/preferences
pub async fn update_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdatePreferences>,
) -> AppResult<impl IntoResponse> {
    let prefs = state.preferences.update(&auth.user_id, input).await?;
    Ok(Json(DataResponse { data: prefs }))
}
