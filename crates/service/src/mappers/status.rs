//! Status display model and form normalization.

use serde::Serialize;

use atelier_core::types::DbId;
use atelier_db::models::status::{CreateStatus, Status, StatusWithCount, UpdateStatus};

#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub id: DbId,
    pub name: String,
    /// Number of projects currently in this status.
    pub project_count: i64,
}

pub fn to_view(status: &StatusWithCount) -> StatusView {
    StatusView {
        id: status.id,
        name: status.name.clone(),
        project_count: status.project_count,
    }
}

/// View for a status that cannot have projects yet.
pub fn from_new(status: &Status) -> StatusView {
    StatusView {
        id: status.id,
        name: status.name.clone(),
        project_count: 0,
    }
}

pub fn sanitize(mut form: CreateStatus) -> CreateStatus {
    form.name = form.name.trim().to_string();
    form
}

pub fn apply_update(status: &mut Status, form: UpdateStatus) {
    status.name = form.name.trim().to_string();
}
