//! Project entity model and DTOs.
//!
//! Projects are the one aggregate keyed by UUID rather than BIGSERIAL.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub image_path: Option<String>,
    pub client_id: DbId,
    pub status_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A member row joined with its `project_members` assignment, as
/// returned by [`ProjectRepo::assigned_members`].
///
/// [`ProjectRepo::assigned_members`]: crate::repositories::ProjectRepo::assigned_members
#[derive(Debug, Clone, FromRow)]
pub struct AssignedMember {
    pub project_id: Uuid,
    pub member_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_path: Option<String>,
    pub role_id: Option<DbId>,
}

/// Form for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 0.0))]
    pub budget: Option<f64>,
    pub client_id: DbId,
    pub status_id: DbId,
    /// Members assigned at creation. Unknown ids are ignored.
    #[serde(default)]
    pub member_ids: Vec<DbId>,
    pub image_path: Option<String>,
}

/// Form for editing an existing project.
///
/// `member_ids` replaces the assignment set wholesale; an empty
/// `image_path` keeps the stored cover image.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 0.0))]
    pub budget: Option<f64>,
    pub client_id: DbId,
    pub status_id: DbId,
    #[serde(default)]
    pub member_ids: Vec<DbId>,
    pub image_path: Option<String>,
}
