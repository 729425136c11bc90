//! User account display models.

use serde::Serialize;

use atelier_core::types::{DbId, Timestamp};
use atelier_db::models::user::{RegisterUser, User};

use super::member::MemberView;

/// Outward representation of an account. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub theme: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// An account plus its linked team member, when one exists.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user: UserView,
    pub member: Option<MemberView>,
}

pub fn to_view(user: &User) -> UserView {
    UserView {
        id: user.id,
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        theme: user.theme.clone(),
        last_login_at: user.last_login_at,
        created_at: user.created_at,
    }
}

pub fn sanitize_registration(mut form: RegisterUser) -> RegisterUser {
    form.email = form.email.trim().to_string();
    form.first_name = form.first_name.trim().to_string();
    form.last_name = form.last_name.trim().to_string();
    form
}
