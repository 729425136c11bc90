//! Handlers for the `/clients` resource.

use axum::extract::{Multipart, Path, State};
use axum::response::Response;
use axum::Json;

use atelier_core::types::DbId;
use atelier_db::models::client::{CreateClient, UpdateClient};
use atelier_service::services::ClientService;

use crate::error::{respond, validated, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::{image_upload, storage_error};

/// POST /api/v1/clients
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(ClientService::create(&state.pool, input).await))
}

/// GET /api/v1/clients
pub async fn list(_auth: AuthUser, State(state): State<AppState>) -> Response {
    respond(ClientService::list(&state.pool).await)
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(ClientService::get(&state.pool, id).await)
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(ClientService::update(&state.pool, id, input).await))
}

/// DELETE /api/v1/clients/{id}
///
/// Removes the client and, through the cascade, its projects.
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(ClientService::delete(&state.pool, id).await)
}

/// POST /api/v1/clients/{id}/image
///
/// Replace the client's logo with an uploaded file.
pub async fn upload_image(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let (bytes, file_name) = image_upload(&mut multipart).await?;
    let path = state
        .storage
        .save_file(&bytes, &file_name, "clients")
        .await
        .map_err(storage_error)?;
    Ok(respond(
        ClientService::update_image(&state.pool, id, path).await,
    ))
}
