//! Repository for refresh sessions.

use atelier_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::session::Session;

/// Column list shared across queries.
const COLUMNS: &str =
    "id, user_id, refresh_token_hash, expires_at, revoked_at, created_at, updated_at";

/// Provides refresh-session persistence.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session for a user.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        refresh_token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .bind(refresh_token_hash)
            .bind(expires_at)
            .fetch_one(executor)
            .await
    }

    /// Find a live session by token hash: not revoked, not expired.
    pub async fn find_active(
        executor: impl PgExecutor<'_>,
        refresh_token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE refresh_token_hash = $1
               AND revoked_at IS NULL
               AND expires_at > now()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(refresh_token_hash)
            .fetch_optional(executor)
            .await
    }

    /// Revoke one session. Returns `true` if a live session was revoked.
    pub async fn revoke(executor: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE sessions SET revoked_at = now() WHERE id = $1 AND revoked_at IS NULL")
                .bind(id)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every live session of a user. Returns the revoked count.
    pub async fn revoke_all_for_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = now() WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
