//! Handlers for the `/auth` resource: registration, sign-in, token
//! refresh, sign-out, and the password reset pair.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use atelier_core::error::CoreError;
use atelier_db::models::password_reset::{ForgotPassword, ResetPassword};
use atelier_db::models::user::{Credentials, RegisterUser};
use atelier_db::repositories::SessionRepo;
use atelier_service::services::account_service::SignedInUser;
use atelier_service::services::AccountService;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::error::{respond, validated, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for the refresh exchange.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by sign-in and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires.
    pub expires_in: i64,
    pub user: SignedInUser,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account together with its team member profile. Returns the
/// profile; the client signs in afterwards to obtain tokens.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterUser>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(AccountService::register(&state.pool, input).await))
}

/// POST /api/v1/auth/sign-in
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> AppResult<Response> {
    validated(&input)?;

    let outcome = AccountService::sign_in(&state.pool, input).await;
    if !outcome.succeeded {
        return Ok(respond(outcome));
    }
    let Some(signed_in) = outcome.result else {
        return Err(AppError::InternalError("Sign-in returned no payload".into()));
    };

    let response = create_auth_response(&state, signed_in).await?;
    Ok(Json(DataResponse { data: response }).into_response())
}

/// POST /api/v1/auth/refresh
///
/// Rotate a refresh token: the presented token's session is revoked and a
/// brand-new token pair is issued in its place.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Response> {
    // 1. Find the live session matching the token's hash.
    let token_hash = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_active(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 2. Revoke the old session (token rotation).
    SessionRepo::revoke(&state.pool, session.id).await?;

    // 3. Reload the account and its current role.
    let outcome = AccountService::session_user(&state.pool, session.user_id).await;
    if !outcome.succeeded {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Account no longer exists".into(),
        )));
    }
    let Some(signed_in) = outcome.result else {
        return Err(AppError::InternalError("Refresh returned no payload".into()));
    };

    // 4. Generate new tokens and create a new session.
    let response = create_auth_response(&state, signed_in).await?;
    Ok(Json(DataResponse { data: response }).into_response())
}

/// POST /api/v1/auth/sign-out
///
/// Revoke all sessions for the authenticated account. Returns 204.
pub async fn sign_out(State(state): State<AppState>, auth: AuthUser) -> Response {
    respond(AccountService::sign_out(&state.pool, auth.user_id).await)
}

/// POST /api/v1/auth/forgot-password
///
/// Issue a password reset token. The response is identical whether or
/// not the email matched an account.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPassword>,
) -> AppResult<Response> {
    validated(&input)?;

    let outcome = AccountService::forgot_password(&state.pool, input).await;
    if let Some(issued) = outcome.result.as_ref() {
        if let Some(token) = issued.token.as_deref() {
            // No mailer is wired up; surface the token in server logs so
            // operators can hand out the reset link.
            tracing::debug!(token, "Password reset token issued");
        }
    }
    Ok(respond(outcome))
}

/// POST /api/v1/auth/reset-password
///
/// Redeem a reset token: sets the new password and revokes every open
/// session. Returns 204.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPassword>,
) -> AppResult<Response> {
    validated(&input)?;
    Ok(respond(AccountService::reset_password(&state.pool, input).await))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mint both tokens for a signed-in account and persist the refresh session.
async fn create_auth_response(
    state: &AppState,
    signed_in: SignedInUser,
) -> AppResult<AuthResponse> {
    let access_token =
        generate_access_token(signed_in.user.id, signed_in.role.as_deref(), &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);
    SessionRepo::create(&state.pool, signed_in.user.id, &refresh_hash, expires_at).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: signed_in,
    })
}
