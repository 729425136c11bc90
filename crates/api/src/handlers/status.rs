//! Handlers for the `/statuses` catalog.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use atelier_core::types::DbId;
use atelier_db::models::status::{CreateStatus, UpdateStatus};
use atelier_service::services::StatusService;

use crate::error::{respond, validated, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/statuses
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateStatus>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(StatusService::create(&state.pool, input).await))
}

/// GET /api/v1/statuses
pub async fn list(_auth: AuthUser, State(state): State<AppState>) -> Response {
    respond(StatusService::list(&state.pool).await)
}

/// GET /api/v1/statuses/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(StatusService::get(&state.pool, id).await)
}

/// PUT /api/v1/statuses/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatus>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(StatusService::update(&state.pool, id, input).await))
}

/// DELETE /api/v1/statuses/{id}
///
/// Refused with 409 while any project still carries the status.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(StatusService::delete(&state.pool, id).await)
}
