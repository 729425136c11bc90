//! Client entity model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub image_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Form for creating a new client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClient {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    /// Path of a previously uploaded logo, if any.
    pub image_path: Option<String>,
}

/// Form for editing an existing client.
///
/// An empty `image_path` keeps the stored image.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateClient {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub image_path: Option<String>,
}
