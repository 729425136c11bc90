//! Role display model and form normalization.

use serde::Serialize;

use atelier_core::types::DbId;
use atelier_db::models::role::{CreateRole, Role, UpdateRole};

#[derive(Debug, Clone, Serialize)]
pub struct RoleView {
    pub id: DbId,
    pub name: String,
}

pub fn to_view(role: &Role) -> RoleView {
    RoleView {
        id: role.id,
        name: role.name.clone(),
    }
}

pub fn sanitize(mut form: CreateRole) -> CreateRole {
    form.name = form.name.trim().to_string();
    form
}

pub fn apply_update(role: &mut Role, form: UpdateRole) {
    role.name = form.name.trim().to_string();
}
