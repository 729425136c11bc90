//! Handlers for the `/notifications` resource.
//!
//! Sending is an admin operation; everything else acts on the calling
//! user's own view of the feed.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use atelier_core::types::DbId;
use atelier_db::models::notification::CreateNotification;
use atelier_service::services::NotificationService;

use crate::error::{respond, validated, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// When true, read notifications are filtered out.
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/notifications (admin only)
///
/// Persists the notification and pushes it over the event bus, so
/// connected sockets see it without polling.
pub async fn send(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(
        NotificationService::send(&state.pool, &state.event_bus, input).await,
    ))
}

/// GET /api/v1/notifications?unread_only=&limit=&offset=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> Response {
    respond(
        NotificationService::list_for(
            &state.pool,
            auth.user_id,
            params.unread_only.unwrap_or(false),
            params.limit,
            params.offset,
        )
        .await,
    )
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(auth: AuthUser, State(state): State<AppState>) -> Response {
    respond(NotificationService::unread_count(&state.pool, auth.user_id).await)
}

/// POST /api/v1/notifications/{id}/read
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(NotificationService::mark_read(&state.pool, auth.user_id, id).await)
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(auth: AuthUser, State(state): State<AppState>) -> Response {
    respond(NotificationService::mark_all_read(&state.pool, auth.user_id).await)
}

/// DELETE /api/v1/notifications/{id}
///
/// Dismissal only hides the notification for the calling user; other
/// recipients keep theirs.
pub async fn dismiss(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> Response {
    respond(NotificationService::dismiss(&state.pool, auth.user_id, id).await)
}
