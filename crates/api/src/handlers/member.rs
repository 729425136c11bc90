//! Handlers for the `/members` resource.
//!
//! Deleting a member is admin-only; the rest is open to any
//! authenticated account.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use atelier_core::types::DbId;
use atelier_db::models::member::{CreateMember, UpdateMember};
use atelier_service::services::MemberService;

use crate::error::{respond, validated, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

use super::{image_upload, storage_error};

/// Query parameters for `GET /members`.
#[derive(Debug, Deserialize)]
pub struct MemberListParams {
    /// Case-insensitive name/email filter. Empty matches everyone.
    pub search: Option<String>,
}

/// POST /api/v1/members
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMember>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(MemberService::create(&state.pool, input).await))
}

/// GET /api/v1/members?search=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MemberListParams>,
) -> Response {
    let term = params.search.as_deref().unwrap_or("");
    respond(MemberService::list(&state.pool, term).await)
}

/// GET /api/v1/members/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(MemberService::get(&state.pool, id).await)
}

/// PUT /api/v1/members/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMember>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(MemberService::update(&state.pool, id, input).await))
}

/// DELETE /api/v1/members/{id} (admin only)
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(MemberService::delete(&state.pool, id).await)
}

/// POST /api/v1/members/{id}/image
///
/// Replace the member's avatar with an uploaded file.
pub async fn upload_image(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let (bytes, file_name) = image_upload(&mut multipart).await?;
    let path = state
        .storage
        .save_file(&bytes, &file_name, "members")
        .await
        .map_err(storage_error)?;
    Ok(respond(
        MemberService::update_image(&state.pool, id, path).await,
    ))
}
