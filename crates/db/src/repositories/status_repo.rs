//! Repository for the `statuses` lookup table.

use atelier_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::status::{CreateStatus, Status, StatusWithCount};
use crate::store::{self, ListSpec, Table};

impl Table for Status {
    type Key = DbId;
    const TABLE: &'static str = "statuses";
    const COLUMNS: &'static str = "id, name, created_at, updated_at";
}

/// Provides CRUD and project-count queries for statuses.
pub struct StatusRepo;

impl StatusRepo {
    /// Insert a new status, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateStatus,
    ) -> Result<Status, sqlx::Error> {
        let query = format!(
            "INSERT INTO statuses (name) VALUES ($1) RETURNING {}",
            Status::COLUMNS
        );
        sqlx::query_as::<_, Status>(&query)
            .bind(&input.name)
            .fetch_one(executor)
            .await
    }

    /// Find a status by its primary key.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Status>, sqlx::Error> {
        store::find_by_id::<Status>(executor, id).await
    }

    /// List all statuses in seed order.
    pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<Status>, sqlx::Error> {
        store::list::<Status>(executor, &ListSpec::by("id")).await
    }

    /// List all statuses with the number of projects currently in each.
    pub async fn list_with_counts(
        executor: impl PgExecutor<'_>,
    ) -> Result<Vec<StatusWithCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusWithCount>(
            "SELECT s.id, s.name, COUNT(p.id) AS project_count, s.created_at, s.updated_at
             FROM statuses s
             LEFT JOIN projects p ON p.status_id = s.id
             GROUP BY s.id
             ORDER BY s.id ASC",
        )
        .fetch_all(executor)
        .await
    }

    /// Find one status with its project count.
    pub async fn find_with_count(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<StatusWithCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusWithCount>(
            "SELECT s.id, s.name, COUNT(p.id) AS project_count, s.created_at, s.updated_at
             FROM statuses s
             LEFT JOIN projects p ON p.status_id = s.id
             WHERE s.id = $1
             GROUP BY s.id",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Write a status row back in full.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        status: &Status,
    ) -> Result<Option<Status>, sqlx::Error> {
        let query = format!(
            "UPDATE statuses SET name = $2 WHERE id = $1 RETURNING {}",
            Status::COLUMNS
        );
        sqlx::query_as::<_, Status>(&query)
            .bind(status.id)
            .bind(&status.name)
            .fetch_optional(executor)
            .await
    }

    /// Delete a status by id. Returns `true` if a row was removed.
    pub async fn delete(executor: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        store::delete_by_id::<Status>(executor, id).await
    }

    /// Whether a status with this exact name exists, optionally ignoring
    /// one row.
    pub async fn name_taken(
        executor: impl PgExecutor<'_>,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM statuses
                WHERE name = $1 AND ($2::bigint IS NULL OR id <> $2)
            )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(executor)
        .await
    }

    /// Whether any project still references this status.
    pub async fn in_use(executor: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM projects WHERE status_id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }
}
