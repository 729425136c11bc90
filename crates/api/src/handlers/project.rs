//! Handlers for the `/projects` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use atelier_core::types::Timestamp;
use atelier_db::models::project::{CreateProject, UpdateProject};
use atelier_service::services::ProjectService;

use crate::error::{respond, validated, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::{image_upload, storage_error};

/// Query parameters for `GET /projects`.
///
/// `status` filters by status name and wins over `created_after`.
#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<String>,
    /// RFC 3339 timestamp; only projects created after it are returned.
    pub created_after: Option<Timestamp>,
}

/// POST /api/v1/projects
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(ProjectService::create(&state.pool, input).await))
}

/// GET /api/v1/projects?status=&created_after=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> Response {
    respond(
        ProjectService::list(&state.pool, params.status.as_deref(), params.created_after).await,
    )
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    respond(ProjectService::get(&state.pool, id).await)
}

/// PUT /api/v1/projects/{id}
///
/// Replaces the assigned member set wholesale; unknown member ids are
/// dropped silently.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(ProjectService::update(&state.pool, id, input).await))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    respond(ProjectService::delete(&state.pool, id).await)
}

/// POST /api/v1/projects/{id}/image
///
/// Replace the project's cover image with an uploaded file.
pub async fn upload_image(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let (bytes, file_name) = image_upload(&mut multipart).await?;
    let path = state
        .storage
        .save_file(&bytes, &file_name, "projects")
        .await
        .map_err(storage_error)?;
    Ok(respond(
        ProjectService::update_image(&state.pool, id, path).await,
    ))
}
