//! Team member entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub image_path: Option<String>,
    pub role_id: Option<DbId>,
    pub address_id: Option<DbId>,
    /// Account this member belongs to, once registered.
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Form for creating a new member.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMember {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role_id: Option<DbId>,
    pub address_id: Option<DbId>,
    /// Path of a previously uploaded avatar. When absent a bundled
    /// default avatar is assigned.
    pub image_path: Option<String>,
}

/// Form for editing an existing member.
///
/// An empty `image_path` keeps the stored avatar.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMember {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role_id: Option<DbId>,
    pub address_id: Option<DbId>,
    pub image_path: Option<String>,
}
