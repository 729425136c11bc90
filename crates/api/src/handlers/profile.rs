//! Handlers for the `/profile` resource (the authenticated account).

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use atelier_db::models::user::UpdateTheme;
use atelier_service::services::ProfileService;

use crate::error::{respond, validated, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/profile/me
///
/// The authenticated account plus its linked team member, if any.
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> Response {
    respond(ProfileService::me(&state.pool, auth.user_id).await)
}

/// PUT /api/v1/profile/theme
///
/// Switch the account's display theme.
pub async fn update_theme(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateTheme>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(
        ProfileService::update_theme(&state.pool, auth.user_id, input).await,
    ))
}
