//! Notification display models.

use atelier_core::images::{normalize_image_path, PLACEHOLDER_NOTIFICATION};
use atelier_core::types::{DbId, Timestamp};
use atelier_db::models::notification::{CreateNotification, Notification, NotificationWithReceipt};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A notification as seen by one recipient.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    pub id: DbId,
    pub message: String,
    pub image_path: String,
    pub audience: String,
    pub created_at: Timestamp,
    pub read: bool,
    pub dismissed: bool,
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Build the per-recipient view from a notification row joined with the
/// recipient's receipt.
pub fn to_view(row: &NotificationWithReceipt) -> NotificationView {
    NotificationView {
        id: row.id,
        message: row.message.clone(),
        image_path: normalize_image_path(row.image_path.as_deref(), PLACEHOLDER_NOTIFICATION),
        audience: row.audience.clone(),
        created_at: row.created_at,
        read: row.read_at.is_some(),
        dismissed: row.dismissed_at.is_some(),
    }
}

/// Build the view for a notification that was just created. Nobody has a
/// receipt yet, so both flags start out false.
pub fn from_new(notification: &Notification) -> NotificationView {
    NotificationView {
        id: notification.id,
        message: notification.message.clone(),
        image_path: normalize_image_path(
            notification.image_path.as_deref(),
            PLACEHOLDER_NOTIFICATION,
        ),
        audience: notification.audience.clone(),
        created_at: notification.created_at,
        read: false,
        dismissed: false,
    }
}

/// Trim the message, collapse a blank image path, and lowercase the
/// audience so `"Role"` and `"role"` mean the same thing.
pub fn sanitize(form: CreateNotification) -> CreateNotification {
    CreateNotification {
        message: form.message.trim().to_string(),
        image_path: atelier_core::images::clean_optional(form.image_path),
        audience: form.audience.trim().to_lowercase(),
        role_id: form.role_id,
        user_id: form.user_id,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
