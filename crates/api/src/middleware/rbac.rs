//! Role-based route guards.
//!
//! Authorization follows the linked team member's role: the role name is
//! baked into the access token at sign-in, so a role change takes effect on
//! the next refresh. Admin-gated surfaces (role management, notification
//! send, member delete) take [`RequireAdmin`] instead of plain [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use atelier_core::error::CoreError;
use atelier_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Admits only accounts whose linked member holds the `admin` role; every
/// other caller is rejected with 403 Forbidden.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(auth): RequireAdmin) -> Response {
///     // auth.role is guaranteed to be Some("admin") here
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        match auth.role.as_deref() {
            Some(ROLE_ADMIN) => Ok(RequireAdmin(auth)),
            _ => Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            ))),
        }
    }
}
