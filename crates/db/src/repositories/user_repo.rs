//! Repository for the `users` table.

use atelier_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::user::User;
use crate::store::{self, Table};

impl Table for User {
    type Key = DbId;
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str = "id, email, first_name, last_name, password_hash, theme, \
         last_login_at, created_at, updated_at";
}

/// Provides account queries for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with an already-hashed password, returning the
    /// created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        email: &str,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, first_name, last_name, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            User::COLUMNS
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(first_name)
            .bind(last_name)
            .bind(password_hash)
            .fetch_one(executor)
            .await
    }

    /// Find a user by its primary key.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        store::find_by_id::<User>(executor, id).await
    }

    /// Find a user by email.
    pub async fn find_by_email(
        executor: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {} FROM users WHERE email = $1", User::COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// Whether a user with this email exists.
    pub async fn email_taken(
        executor: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(executor)
            .await
    }

    /// Stamp a successful sign-in.
    pub async fn record_login(executor: impl PgExecutor<'_>, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = now() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Replace a user's password hash.
    pub async fn update_password(
        executor: impl PgExecutor<'_>,
        id: DbId,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Set a user's display theme. Returns `false` if no row matched.
    pub async fn update_theme(
        executor: impl PgExecutor<'_>,
        id: DbId,
        theme: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET theme = $2 WHERE id = $1")
            .bind(id)
            .bind(theme)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
