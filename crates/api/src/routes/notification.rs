//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication; sending requires admin.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /              -> list (?unread_only, limit, offset)
/// POST   /              -> send (admin only)
/// POST   /read-all      -> mark_all_read
/// GET    /unread-count  -> unread_count
/// POST   /{id}/read     -> mark_read
/// DELETE /{id}          -> dismiss
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list).post(notification::send))
        .route("/read-all", post(notification::mark_all_read))
        .route("/unread-count", get(notification::unread_count))
        .route("/{id}/read", post(notification::mark_read))
        .route("/{id}", delete(notification::dismiss))
}
