//! Handlers for the `/roles` catalog.
//!
//! Reads are open to any signed-in account; mutations change what other
//! people are allowed to do, so they require the admin role.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use atelier_core::types::DbId;
use atelier_db::models::role::{CreateRole, UpdateRole};
use atelier_service::services::RoleService;

use crate::error::{respond, validated, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/roles (admin only)
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateRole>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(RoleService::create(&state.pool, input).await))
}

/// GET /api/v1/roles
pub async fn list(_auth: AuthUser, State(state): State<AppState>) -> Response {
    respond(RoleService::list(&state.pool).await)
}

/// GET /api/v1/roles/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(RoleService::get(&state.pool, id).await)
}

/// PUT /api/v1/roles/{id} (admin only)
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRole>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(RoleService::update(&state.pool, id, input).await))
}

/// DELETE /api/v1/roles/{id} (admin only)
///
/// Members holding the role fall back to none; already-issued tokens
/// keep their baked-in role until refresh.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(RoleService::delete(&state.pool, id).await)
}
