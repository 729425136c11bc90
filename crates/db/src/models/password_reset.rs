//! Password reset token model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `password_reset_tokens` table. Stores only the
/// SHA-256 of the token handed to the user.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Form requesting a password reset link.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPassword {
    #[validate(email)]
    pub email: String,
}

/// Form completing a password reset.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPassword {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}
