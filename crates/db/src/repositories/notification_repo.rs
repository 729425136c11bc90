//! Repository for notifications and per-user receipts.
//!
//! Visibility: a notification reaches a user when its audience is
//! `global`, `role` matching the role of the user's linked member, or
//! `user` matching the user directly. Receipts record read/dismiss state
//! and are created lazily on first interaction.

use atelier_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::notification::{CreateNotification, Notification, NotificationWithReceipt};
use crate::models::notification::{AUDIENCE_GLOBAL, AUDIENCE_ROLE, AUDIENCE_USER};

/// Column list shared across queries.
const COLUMNS: &str = "id, message, image_path, audience, role_id, user_id, created_at, updated_at";

/// Visibility predicate shared by the receipt queries.
/// Binds: $1 = user id, $2 = the user's role id (nullable).
const VISIBLE: &str = "(n.audience = 'global'
       OR (n.audience = 'role' AND n.role_id = $2)
       OR (n.audience = 'user' AND n.user_id = $1))";

/// Provides notification and receipt queries.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a new notification, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (message, image_path, audience, role_id, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(&input.message)
            .bind(&input.image_path)
            .bind(&input.audience)
            .bind(input.role_id)
            .bind(input.user_id)
            .fetch_one(executor)
            .await
    }

    /// Find a notification by its primary key.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List the notifications visible to a user, newest first, excluding
    /// dismissed ones. `unread_only` further drops read rows.
    pub async fn visible_to(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        role_id: Option<DbId>,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NotificationWithReceipt>, sqlx::Error> {
        let query = format!(
            "SELECT n.id, n.message, n.image_path, n.audience, n.created_at,
                    r.read_at, r.dismissed_at
             FROM notifications n
             LEFT JOIN notification_receipts r
                 ON r.notification_id = n.id AND r.user_id = $1
             WHERE {VISIBLE}
               AND r.dismissed_at IS NULL
               AND (NOT $3 OR r.read_at IS NULL)
             ORDER BY n.created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, NotificationWithReceipt>(&query)
            .bind(user_id)
            .bind(role_id)
            .bind(unread_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    /// Count the unread, undismissed notifications visible to a user.
    pub async fn unread_count(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        role_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*)
             FROM notifications n
             LEFT JOIN notification_receipts r
                 ON r.notification_id = n.id AND r.user_id = $1
             WHERE {VISIBLE}
               AND r.dismissed_at IS NULL
               AND r.read_at IS NULL"
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(user_id)
            .bind(role_id)
            .fetch_one(executor)
            .await
    }

    /// Mark one visible notification read for a user.
    ///
    /// Returns `false` when the notification does not exist or is not
    /// visible to the user. Already-read rows keep their original
    /// `read_at`.
    pub async fn mark_read(
        executor: impl PgExecutor<'_>,
        notification_id: DbId,
        user_id: DbId,
        role_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_receipts (notification_id, user_id, read_at)
             SELECT n.id, $1, now() FROM notifications n
             WHERE n.id = $3 AND {VISIBLE}
             ON CONFLICT (notification_id, user_id)
             DO UPDATE SET read_at = COALESCE(notification_receipts.read_at, now())"
        );
        let result = sqlx::query(&query)
            .bind(user_id)
            .bind(role_id)
            .bind(notification_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark every visible unread notification read for a user. Returns
    /// the number of rows touched.
    pub async fn mark_all_read(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        role_id: Option<DbId>,
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_receipts (notification_id, user_id, read_at)
             SELECT n.id, $1, now()
             FROM notifications n
             LEFT JOIN notification_receipts r
                 ON r.notification_id = n.id AND r.user_id = $1
             WHERE {VISIBLE}
               AND r.dismissed_at IS NULL
               AND r.read_at IS NULL
             ON CONFLICT (notification_id, user_id)
             DO UPDATE SET read_at = COALESCE(notification_receipts.read_at, now())"
        );
        let result = sqlx::query(&query)
            .bind(user_id)
            .bind(role_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Dismiss one visible notification for a user, hiding it from
    /// future listings. Returns `false` when not visible.
    pub async fn dismiss(
        executor: impl PgExecutor<'_>,
        notification_id: DbId,
        user_id: DbId,
        role_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_receipts (notification_id, user_id, dismissed_at)
             SELECT n.id, $1, now() FROM notifications n
             WHERE n.id = $3 AND {VISIBLE}
             ON CONFLICT (notification_id, user_id)
             DO UPDATE SET dismissed_at = COALESCE(notification_receipts.dismissed_at, now())"
        );
        let result = sqlx::query(&query)
            .bind(user_id)
            .bind(role_id)
            .bind(notification_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Resolve an audience to the user ids it reaches, for push fanout.
    pub async fn target_user_ids(
        executor: impl PgExecutor<'_>,
        audience: &str,
        role_id: Option<DbId>,
        user_id: Option<DbId>,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        match audience {
            AUDIENCE_GLOBAL => {
                sqlx::query_scalar::<_, DbId>("SELECT id FROM users ORDER BY id")
                    .fetch_all(executor)
                    .await
            }
            AUDIENCE_ROLE => {
                sqlx::query_scalar::<_, DbId>(
                    "SELECT u.id FROM users u
                     JOIN members m ON m.user_id = u.id
                     WHERE m.role_id = $1
                     ORDER BY u.id",
                )
                .bind(role_id)
                .fetch_all(executor)
                .await
            }
            AUDIENCE_USER => {
                sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE id = $1")
                    .bind(user_id)
                    .fetch_all(executor)
                    .await
            }
            _ => Ok(Vec::new()),
        }
    }
}
