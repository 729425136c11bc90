//! Project operations.
//!
//! Projects aggregate a client, a status and a member assignment set,
//! so every read assembles the display model from up to three extra
//! queries. Writes replace the assignment set wholesale inside the same
//! transaction as the project row.

use std::collections::HashMap;

use atelier_core::types::{DbId, Timestamp};
use atelier_db::models::client::Client;
use atelier_db::models::project::{CreateProject, Project, UpdateProject};
use atelier_db::repositories::{ClientRepo, ProjectRepo, StatusRepo};
use atelier_db::{DbPool, ListSpec, UnitOfWork};
use uuid::Uuid;

use crate::mappers::project::{self, ProjectMemberView, ProjectView};
use crate::result::{run, ServiceResult};

/// Project business operations.
pub struct ProjectService;

impl ProjectService {
    /// Create a project. The client and status must exist; unknown
    /// member ids are dropped from the assignment set.
    pub async fn create(pool: &DbPool, form: CreateProject) -> ServiceResult<ProjectView> {
        run(async {
            let form = project::sanitize(form);
            let Some(client_row) = ClientRepo::find_by_id(pool, form.client_id).await? else {
                return Ok(ServiceResult::bad_request(format!(
                    "Client {} does not exist",
                    form.client_id
                )));
            };
            let Some(status_row) = StatusRepo::find_by_id(pool, form.status_id).await? else {
                return Ok(ServiceResult::bad_request(format!(
                    "Status {} does not exist",
                    form.status_id
                )));
            };

            let mut uow = UnitOfWork::new(pool.clone());
            let created = ProjectRepo::create(uow.tx().await?, &form).await?;
            ProjectRepo::set_members(uow.tx().await?, created.id, &form.member_ids).await?;
            uow.commit().await?;

            let members = members_of(pool, created.id).await?;
            Ok(ServiceResult::created(project::to_view(
                &created,
                Some(&client_row),
                Some(&status_row.name),
                members,
            )))
        })
        .await
    }

    /// Fetch one project with client, status and members resolved.
    pub async fn get(pool: &DbPool, id: Uuid) -> ServiceResult<ProjectView> {
        run(async {
            let Some(found) = ProjectRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Project", id));
            };
            let view = assemble_one(pool, found).await?;
            Ok(ServiceResult::ok(view))
        })
        .await
    }

    /// List projects, newest first.
    ///
    /// `status` filters by status name and wins over `created_after`,
    /// which keeps only projects created strictly after the cutoff.
    pub async fn list(
        pool: &DbPool,
        status: Option<&str>,
        created_after: Option<Timestamp>,
    ) -> ServiceResult<Vec<ProjectView>> {
        run(async {
            let projects = match (status, created_after) {
                (Some(name), _) => ProjectRepo::list_by_status_name(pool, name).await?,
                (None, Some(cutoff)) => ProjectRepo::created_after(pool, cutoff).await?,
                (None, None) => ProjectRepo::list(pool, &ListSpec::newest_first()).await?,
            };
            let views = assemble(pool, projects).await?;
            Ok(ServiceResult::ok(views))
        })
        .await
    }

    /// Replace a project's editable fields and its member assignments.
    /// A blank image path keeps the stored cover.
    pub async fn update(
        pool: &DbPool,
        id: Uuid,
        form: UpdateProject,
    ) -> ServiceResult<ProjectView> {
        run(async {
            let Some(mut existing) = ProjectRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Project", id));
            };
            let Some(client_row) = ClientRepo::find_by_id(pool, form.client_id).await? else {
                return Ok(ServiceResult::bad_request(format!(
                    "Client {} does not exist",
                    form.client_id
                )));
            };
            let Some(status_row) = StatusRepo::find_by_id(pool, form.status_id).await? else {
                return Ok(ServiceResult::bad_request(format!(
                    "Status {} does not exist",
                    form.status_id
                )));
            };
            project::apply_update(&mut existing, &form);

            let mut uow = UnitOfWork::new(pool.clone());
            let updated = ProjectRepo::update(uow.tx().await?, &existing).await?;
            let Some(row) = updated else {
                return Ok(ServiceResult::not_found("Project", id));
            };
            ProjectRepo::set_members(uow.tx().await?, id, &form.member_ids).await?;
            uow.commit().await?;

            let members = members_of(pool, id).await?;
            Ok(ServiceResult::ok(project::to_view(
                &row,
                Some(&client_row),
                Some(&status_row.name),
                members,
            )))
        })
        .await
    }

    /// Delete a project and its member assignments.
    pub async fn delete(pool: &DbPool, id: Uuid) -> ServiceResult<()> {
        run(async {
            let mut uow = UnitOfWork::new(pool.clone());
            let removed = ProjectRepo::delete(uow.tx().await?, id).await?;
            uow.commit().await?;
            if removed {
                Ok(ServiceResult::no_content())
            } else {
                Ok(ServiceResult::not_found("Project", id))
            }
        })
        .await
    }

    /// Point a project at a freshly uploaded cover image.
    pub async fn update_image(
        pool: &DbPool,
        id: Uuid,
        image_path: String,
    ) -> ServiceResult<ProjectView> {
        run(async {
            let Some(mut existing) = ProjectRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Project", id));
            };
            existing.image_path = Some(image_path);

            let mut uow = UnitOfWork::new(pool.clone());
            let updated = ProjectRepo::update(uow.tx().await?, &existing).await?;
            uow.commit().await?;
            match updated {
                Some(row) => {
                    let view = assemble_one(pool, row).await?;
                    Ok(ServiceResult::ok(view))
                }
                None => Ok(ServiceResult::not_found("Project", id)),
            }
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// View assembly
// ---------------------------------------------------------------------------

/// Fetch the member summaries assigned to one project.
async fn members_of(pool: &DbPool, project_id: Uuid) -> Result<Vec<ProjectMemberView>, sqlx::Error> {
    let assigned = ProjectRepo::assigned_members(pool, &[project_id]).await?;
    Ok(assigned.iter().map(project::member_view).collect())
}

/// Build views for a project listing with three batched reads.
async fn assemble(pool: &DbPool, projects: Vec<Project>) -> Result<Vec<ProjectView>, sqlx::Error> {
    if projects.is_empty() {
        return Ok(Vec::new());
    }

    let mut client_ids: Vec<DbId> = projects.iter().map(|p| p.client_id).collect();
    client_ids.sort_unstable();
    client_ids.dedup();
    let clients: HashMap<DbId, Client> = ClientRepo::find_by_ids(pool, &client_ids)
        .await?
        .into_iter()
        .map(|client| (client.id, client))
        .collect();

    let statuses: HashMap<DbId, String> = StatusRepo::list(pool)
        .await?
        .into_iter()
        .map(|status| (status.id, status.name))
        .collect();

    let project_ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();
    let mut members_by_project: HashMap<Uuid, Vec<ProjectMemberView>> = HashMap::new();
    for assigned in ProjectRepo::assigned_members(pool, &project_ids).await? {
        members_by_project
            .entry(assigned.project_id)
            .or_default()
            .push(project::member_view(&assigned));
    }

    Ok(projects
        .iter()
        .map(|row| {
            project::to_view(
                row,
                clients.get(&row.client_id),
                statuses.get(&row.status_id).map(String::as_str),
                members_by_project.remove(&row.id).unwrap_or_default(),
            )
        })
        .collect())
}

/// Build the view for a single project.
async fn assemble_one(pool: &DbPool, found: Project) -> Result<ProjectView, sqlx::Error> {
    let mut views = assemble(pool, vec![found]).await?;
    let Some(view) = views.pop() else {
        unreachable!("one project in, one view out")
    };
    Ok(view)
}
