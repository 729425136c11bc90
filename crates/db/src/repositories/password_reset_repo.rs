//! Repository for password reset tokens.

use atelier_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::password_reset::PasswordResetToken;

/// Column list shared across queries.
const COLUMNS: &str = "id, user_id, token_hash, expires_at, used_at, created_at, updated_at";

/// Provides reset-token persistence.
pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Insert a new reset token for a user.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<PasswordResetToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO password_reset_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(user_id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(executor)
            .await
    }

    /// Find a usable token by hash: unused and unexpired.
    pub async fn find_valid(
        executor: impl PgExecutor<'_>,
        token_hash: &str,
    ) -> Result<Option<PasswordResetToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM password_reset_tokens
             WHERE token_hash = $1
               AND used_at IS NULL
               AND expires_at > now()"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(token_hash)
            .fetch_optional(executor)
            .await
    }

    /// Burn a token after a successful reset.
    pub async fn mark_used(executor: impl PgExecutor<'_>, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE password_reset_tokens SET used_at = now() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
