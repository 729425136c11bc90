//! Project status lookup model and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `statuses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Status {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A status joined with the number of projects currently in it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusWithCount {
    pub id: DbId,
    pub name: String,
    pub project_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Form for creating a new status.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStatus {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Form for renaming an existing status.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStatus {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
