pub mod address;
pub mod auth;
pub mod client;
pub mod health;
pub mod member;
pub mod notification;
pub mod profile;
pub mod project;
pub mod role;
pub mod status;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                WebSocket (?token=)
///
/// /auth/register                     register (public)
/// /auth/sign-in                      sign in (public)
/// /auth/refresh                      refresh tokens (public)
/// /auth/sign-out                     sign out (requires auth)
/// /auth/forgot-password              issue reset token (public)
/// /auth/reset-password               redeem reset token (public)
///
/// /profile/me                        signed-in profile (GET)
/// /profile/theme                     UI theme preference (PUT)
///
/// /clients                           list, create
/// /clients/{id}                      get, update, delete
/// /clients/{id}/image                upload image (POST, multipart)
///
/// /members                           list (?search=), create
/// /members/{id}                      get, update, delete (delete admin only)
/// /members/{id}/image                upload avatar (POST, multipart)
///
/// /projects                          list (?status=, ?created_after=), create
/// /projects/{id}                     get, update, delete
/// /projects/{id}/image               upload cover image (POST, multipart)
///
/// /statuses                          list, create
/// /statuses/{id}                     get, update, delete (409 while in use)
///
/// /roles                             list, create (create admin only)
/// /roles/{id}                        get, update, delete (mutations admin only)
///
/// /addresses                         list, create
/// /addresses/{id}                    get, update, delete
///
/// /notifications                     list (?unread_only, limit, offset), send (admin only)
/// /notifications/read-all            mark all read (POST)
/// /notifications/unread-count        unread count (GET)
/// /notifications/{id}/read           mark read (POST)
/// /notifications/{id}                dismiss (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint; the access token rides the query string.
        .route("/ws", get(ws::ws_handler))
        // Account lifecycle (register, sign-in, tokens, password reset).
        .nest("/auth", auth::router())
        // The signed-in account's own profile and preferences.
        .nest("/profile", profile::router())
        // Client companies.
        .nest("/clients", client::router())
        // Team members.
        .nest("/members", member::router())
        // Projects and their member assignments.
        .nest("/projects", project::router())
        // Project status catalog.
        .nest("/statuses", status::router())
        // Member role catalog.
        .nest("/roles", role::router())
        // Postal addresses for members.
        .nest("/addresses", address::router())
        // Notification feed and admin send.
        .nest("/notifications", notification::router())
}
