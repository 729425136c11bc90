//! Handlers for the `/addresses` resource.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use atelier_core::types::DbId;
use atelier_db::models::address::{CreateAddress, UpdateAddress};
use atelier_service::services::AddressService;

use crate::error::{respond, validated, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/addresses
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAddress>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(AddressService::create(&state.pool, input).await))
}

/// GET /api/v1/addresses
pub async fn list(_auth: AuthUser, State(state): State<AppState>) -> Response {
    respond(AddressService::list(&state.pool).await)
}

/// GET /api/v1/addresses/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(AddressService::get(&state.pool, id).await)
}

/// PUT /api/v1/addresses/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAddress>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(AddressService::update(&state.pool, id, input).await))
}

/// DELETE /api/v1/addresses/{id}
///
/// Members that pointed at the address keep working without one.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(AddressService::delete(&state.pool, id).await)
}
