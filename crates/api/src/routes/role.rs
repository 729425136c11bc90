//! Route definitions for the `/roles` catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::role;
use crate::state::AppState;

/// Routes mounted at `/roles`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create (admin only)
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update (admin only)
/// DELETE /{id}  -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(role::list).post(role::create))
        .route(
            "/{id}",
            get(role::get_by_id).put(role::update).delete(role::delete),
        )
}
