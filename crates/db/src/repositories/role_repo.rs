//! Repository for the `roles` lookup table.

use atelier_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::role::{CreateRole, Role};
use crate::store::{self, ListSpec, Table};

impl Table for Role {
    type Key = DbId;
    const TABLE: &'static str = "roles";
    const COLUMNS: &'static str = "id, name, created_at, updated_at";
}

/// Provides CRUD queries for roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a new role, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateRole,
    ) -> Result<Role, sqlx::Error> {
        let query = format!(
            "INSERT INTO roles (name) VALUES ($1) RETURNING {}",
            Role::COLUMNS
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(&input.name)
            .fetch_one(executor)
            .await
    }

    /// Find a role by its primary key.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Role>, sqlx::Error> {
        store::find_by_id::<Role>(executor, id).await
    }

    /// Find a role by its exact name.
    pub async fn find_by_name(
        executor: impl PgExecutor<'_>,
        name: &str,
    ) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {} FROM roles WHERE name = $1", Role::COLUMNS);
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    /// List all roles in seed order.
    pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<Role>, sqlx::Error> {
        store::list::<Role>(executor, &ListSpec::by("id")).await
    }

    /// Write a role row back in full.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        role: &Role,
    ) -> Result<Option<Role>, sqlx::Error> {
        let query = format!(
            "UPDATE roles SET name = $2 WHERE id = $1 RETURNING {}",
            Role::COLUMNS
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(role.id)
            .bind(&role.name)
            .fetch_optional(executor)
            .await
    }

    /// Delete a role by id. Returns `true` if a row was removed.
    pub async fn delete(executor: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        store::delete_by_id::<Role>(executor, id).await
    }

    /// Whether a role with this exact name exists, optionally ignoring
    /// one row.
    pub async fn name_taken(
        executor: impl PgExecutor<'_>,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM roles
                WHERE name = $1 AND ($2::bigint IS NULL OR id <> $2)
            )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(executor)
        .await
    }
}
