//! Repository for the `projects` table and its member assignments.

use atelier_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::models::project::{AssignedMember, CreateProject, Project};
use crate::store::{self, ListSpec, Table};

impl Table for Project {
    type Key = Uuid;
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static str = "id, name, description, start_date, end_date, budget, \
         image_path, client_id, status_id, created_at, updated_at";
}

/// Provides CRUD, lookup-join and assignment queries for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with a fresh UUID, returning the created row.
    ///
    /// Member assignments are written separately via
    /// [`set_members`](Self::set_members).
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (id, name, description, start_date, end_date, budget,
                 image_path, client_id, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {}",
            Project::COLUMNS
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(&input.image_path)
            .bind(input.client_id)
            .bind(input.status_id)
            .fetch_one(executor)
            .await
    }

    /// Find a project by its primary key.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: Uuid,
    ) -> Result<Option<Project>, sqlx::Error> {
        store::find_by_id::<Project>(executor, id).await
    }

    /// List projects per `spec`.
    pub async fn list(
        executor: impl PgExecutor<'_>,
        spec: &ListSpec,
    ) -> Result<Vec<Project>, sqlx::Error> {
        store::list::<Project>(executor, spec).await
    }

    /// List projects created strictly after `cutoff`, newest first.
    pub async fn created_after(
        executor: impl PgExecutor<'_>,
        cutoff: Timestamp,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM projects WHERE created_at > $1 ORDER BY created_at DESC",
            Project::COLUMNS
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(cutoff)
            .fetch_all(executor)
            .await
    }

    /// List projects whose status lookup carries the given name,
    /// newest first.
    pub async fn list_by_status_name(
        executor: impl PgExecutor<'_>,
        status_name: &str,
    ) -> Result<Vec<Project>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            "SELECT p.id, p.name, p.description, p.start_date, p.end_date, p.budget,
                    p.image_path, p.client_id, p.status_id, p.created_at, p.updated_at
             FROM projects p
             JOIN statuses s ON s.id = p.status_id
             WHERE s.name = $1
             ORDER BY p.created_at DESC",
        )
        .bind(status_name)
        .fetch_all(executor)
        .await
    }

    /// Write a project row back in full.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        project: &Project,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET name = $2, description = $3, start_date = $4, end_date = $5,
                 budget = $6, image_path = $7, client_id = $8, status_id = $9
             WHERE id = $1
             RETURNING {}",
            Project::COLUMNS
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(project.id)
            .bind(&project.name)
            .bind(&project.description)
            .bind(project.start_date)
            .bind(project.end_date)
            .bind(project.budget)
            .bind(&project.image_path)
            .bind(project.client_id)
            .bind(project.status_id)
            .fetch_optional(executor)
            .await
    }

    /// Delete a project by id. Returns `true` if a row was removed.
    pub async fn delete(executor: impl PgExecutor<'_>, id: Uuid) -> Result<bool, sqlx::Error> {
        store::delete_by_id::<Project>(executor, id).await
    }

    /// Replace a project's member assignments wholesale.
    ///
    /// Ids that do not match an existing member are dropped silently.
    /// Runs two statements, so it requires an open transaction.
    pub async fn set_members(
        conn: &mut PgConnection,
        project_id: Uuid,
        member_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM project_members WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *conn)
            .await?;

        if !member_ids.is_empty() {
            sqlx::query(
                "INSERT INTO project_members (project_id, member_id)
                 SELECT $1, m.id FROM members m WHERE m.id = ANY($2)",
            )
            .bind(project_id)
            .bind(member_ids)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Fetch the members assigned to any of the given projects.
    pub async fn assigned_members(
        executor: impl PgExecutor<'_>,
        project_ids: &[Uuid],
    ) -> Result<Vec<AssignedMember>, sqlx::Error> {
        sqlx::query_as::<_, AssignedMember>(
            "SELECT pm.project_id, m.id AS member_id, m.first_name, m.last_name,
                    m.email, m.image_path, m.role_id
             FROM project_members pm
             JOIN members m ON m.id = pm.member_id
             WHERE pm.project_id = ANY($1)
             ORDER BY m.last_name ASC, m.first_name ASC",
        )
        .bind(project_ids)
        .fetch_all(executor)
        .await
    }
}
