//! Route definitions for the `/profile` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET /me     -> me
/// PUT /theme  -> update_theme
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(profile::me))
        .route("/theme", put(profile::update_theme))
}
