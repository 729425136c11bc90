//! Notification entity models and DTOs.

use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Audience scope: every user.
pub const AUDIENCE_GLOBAL: &str = "global";
/// Audience scope: users whose member holds a given role.
pub const AUDIENCE_ROLE: &str = "role";
/// Audience scope: one user.
pub const AUDIENCE_USER: &str = "user";

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub message: String,
    pub image_path: Option<String>,
    pub audience: String,
    pub role_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A notification joined with the requesting user's receipt state.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationWithReceipt {
    pub id: DbId,
    pub message: String,
    pub image_path: Option<String>,
    pub audience: String,
    pub created_at: Timestamp,
    pub read_at: Option<Timestamp>,
    pub dismissed_at: Option<Timestamp>,
}

/// Form for sending a notification.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotification {
    #[validate(length(min = 1, max = 1000))]
    pub message: String,
    pub image_path: Option<String>,
    /// `"global"`, `"role"` or `"user"`.
    pub audience: String,
    /// Required when `audience == "role"`.
    pub role_id: Option<DbId>,
    /// Required when `audience == "user"`.
    pub user_id: Option<DbId>,
}
