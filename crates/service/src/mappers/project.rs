//! Project display model and form normalization.
//!
//! The project view embeds its client, status name and assigned member
//! summaries; the services resolve those rows and pass them in.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use atelier_core::images::{clean_optional, normalize_image_path, PLACEHOLDER_MEMBER, PLACEHOLDER_PROJECT};
use atelier_core::types::{DbId, Timestamp};
use atelier_db::models::client::Client;
use atelier_db::models::project::{AssignedMember, CreateProject, Project, UpdateProject};

use super::client::{self, ClientView};

/// Compact summary of a member on a project card.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectMemberView {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_path: String,
    pub role_id: Option<DbId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    /// Always servable: the stored cover, or the project placeholder.
    pub image_path: String,
    pub client: ClientView,
    pub status_id: DbId,
    pub status_name: String,
    pub members: Vec<ProjectMemberView>,
    pub created_at: Timestamp,
}

pub fn member_view(assigned: &AssignedMember) -> ProjectMemberView {
    ProjectMemberView {
        id: assigned.member_id,
        first_name: assigned.first_name.clone(),
        last_name: assigned.last_name.clone(),
        email: assigned.email.clone(),
        image_path: normalize_image_path(assigned.image_path.as_deref(), PLACEHOLDER_MEMBER),
        role_id: assigned.role_id,
    }
}

/// Build the display model from the project row and its resolved lookups.
/// A missing client or status resolves to an empty stand-in.
pub fn to_view(
    project: &Project,
    client_row: Option<&Client>,
    status_name: Option<&str>,
    members: Vec<ProjectMemberView>,
) -> ProjectView {
    ProjectView {
        id: project.id,
        name: project.name.clone(),
        description: project.description.clone(),
        start_date: project.start_date,
        end_date: project.end_date,
        budget: project.budget,
        image_path: normalize_image_path(project.image_path.as_deref(), PLACEHOLDER_PROJECT),
        client: client_row.map(client::to_view).unwrap_or_else(client::empty_view),
        status_id: project.status_id,
        status_name: status_name.unwrap_or_default().to_string(),
        members,
        created_at: project.created_at,
    }
}

pub fn sanitize(mut form: CreateProject) -> CreateProject {
    form.name = form.name.trim().to_string();
    form.description = clean_optional(form.description);
    form.image_path = clean_optional(form.image_path);
    form
}

/// Merge an edit form into a loaded project. A blank `image_path` keeps
/// the stored cover; the member set is replaced separately.
pub fn apply_update(project: &mut Project, form: &UpdateProject) {
    project.name = form.name.trim().to_string();
    project.description = clean_optional(form.description.clone());
    project.start_date = form.start_date;
    project.end_date = form.end_date;
    project.budget = form.budget;
    project.client_id = form.client_id;
    project.status_id = form.status_id;
    if let Some(image) = clean_optional(form.image_path.clone()) {
        project.image_path = Some(image);
    }
}
