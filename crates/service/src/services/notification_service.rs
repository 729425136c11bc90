//! Notification operations: sending, per-recipient listings, and
//! receipt state.
//!
//! Sending commits the row first and publishes to the event bus after,
//! so a socket push never precedes the durable write.

use atelier_core::images::{normalize_image_path, PLACEHOLDER_NOTIFICATION};
use atelier_core::search::Page;
use atelier_core::types::DbId;
use atelier_db::models::notification::{
    CreateNotification, AUDIENCE_GLOBAL, AUDIENCE_ROLE, AUDIENCE_USER,
};
use atelier_db::repositories::{MemberRepo, NotificationRepo, RoleRepo, UserRepo};
use atelier_db::{DbPool, UnitOfWork};
use atelier_events::{Audience, EventBus, NotificationEvent};
use serde::Serialize;

use crate::mappers::notification::{self, NotificationView};
use crate::result::{run, ServiceResult};

/// Unread-count payload.
#[derive(Debug, Clone, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

/// Rows-touched payload for mark-all-read.
#[derive(Debug, Clone, Serialize)]
pub struct MarkedRead {
    pub marked: u64,
}

/// Notification business operations.
pub struct NotificationService;

impl NotificationService {
    /// Send a notification and publish it to connected sockets.
    ///
    /// A role audience must name an existing role, a user audience an
    /// existing user; a global audience carries neither id.
    pub async fn send(
        pool: &DbPool,
        bus: &EventBus,
        form: CreateNotification,
    ) -> ServiceResult<NotificationView> {
        run(async {
            let mut form = notification::sanitize(form);
            let audience = match form.audience.as_str() {
                AUDIENCE_GLOBAL => {
                    form.role_id = None;
                    form.user_id = None;
                    Audience::Global
                }
                AUDIENCE_ROLE => {
                    let Some(role_id) = form.role_id else {
                        return Ok(ServiceResult::bad_request(
                            "A role audience requires role_id",
                        ));
                    };
                    if RoleRepo::find_by_id(pool, role_id).await?.is_none() {
                        return Ok(ServiceResult::bad_request(format!(
                            "Role {role_id} does not exist"
                        )));
                    }
                    form.user_id = None;
                    Audience::Role(role_id)
                }
                AUDIENCE_USER => {
                    let Some(user_id) = form.user_id else {
                        return Ok(ServiceResult::bad_request(
                            "A user audience requires user_id",
                        ));
                    };
                    if UserRepo::find_by_id(pool, user_id).await?.is_none() {
                        return Ok(ServiceResult::bad_request(format!(
                            "User {user_id} does not exist"
                        )));
                    }
                    form.role_id = None;
                    Audience::User(user_id)
                }
                other => {
                    return Ok(ServiceResult::bad_request(format!(
                        "Unknown audience \"{other}\""
                    )));
                }
            };

            let mut uow = UnitOfWork::new(pool.clone());
            let created = NotificationRepo::create(uow.tx().await?, &form).await?;
            uow.commit().await?;

            bus.publish(NotificationEvent {
                notification_id: created.id,
                audience,
                message: created.message.clone(),
                image_path: normalize_image_path(
                    created.image_path.as_deref(),
                    PLACEHOLDER_NOTIFICATION,
                ),
                created_at: created.created_at,
            });
            Ok(ServiceResult::created(notification::from_new(&created)))
        })
        .await
    }

    /// List the notifications visible to a user, newest first.
    pub async fn list_for(
        pool: &DbPool,
        user_id: DbId,
        unread_only: bool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> ServiceResult<Vec<NotificationView>> {
        run(async {
            let role_id = role_id_of(pool, user_id).await?;
            let page = Page::new(limit, offset);
            let rows = NotificationRepo::visible_to(
                pool,
                user_id,
                role_id,
                unread_only,
                page.limit,
                page.offset,
            )
            .await?;
            Ok(ServiceResult::ok(
                rows.iter().map(notification::to_view).collect(),
            ))
        })
        .await
    }

    /// Count the unread notifications visible to a user.
    pub async fn unread_count(pool: &DbPool, user_id: DbId) -> ServiceResult<UnreadCount> {
        run(async {
            let role_id = role_id_of(pool, user_id).await?;
            let count = NotificationRepo::unread_count(pool, user_id, role_id).await?;
            Ok(ServiceResult::ok(UnreadCount { count }))
        })
        .await
    }

    /// Mark one visible notification read for a user.
    pub async fn mark_read(
        pool: &DbPool,
        user_id: DbId,
        notification_id: DbId,
    ) -> ServiceResult<()> {
        run(async {
            let role_id = role_id_of(pool, user_id).await?;
            let mut uow = UnitOfWork::new(pool.clone());
            let marked =
                NotificationRepo::mark_read(uow.tx().await?, notification_id, user_id, role_id)
                    .await?;
            uow.commit().await?;
            if marked {
                Ok(ServiceResult::no_content())
            } else {
                Ok(ServiceResult::not_found("Notification", notification_id))
            }
        })
        .await
    }

    /// Mark every visible unread notification read for a user.
    pub async fn mark_all_read(pool: &DbPool, user_id: DbId) -> ServiceResult<MarkedRead> {
        run(async {
            let role_id = role_id_of(pool, user_id).await?;
            let mut uow = UnitOfWork::new(pool.clone());
            let marked =
                NotificationRepo::mark_all_read(uow.tx().await?, user_id, role_id).await?;
            uow.commit().await?;
            Ok(ServiceResult::ok(MarkedRead { marked }))
        })
        .await
    }

    /// Dismiss one visible notification for a user, hiding it from
    /// future listings.
    pub async fn dismiss(
        pool: &DbPool,
        user_id: DbId,
        notification_id: DbId,
    ) -> ServiceResult<()> {
        run(async {
            let role_id = role_id_of(pool, user_id).await?;
            let mut uow = UnitOfWork::new(pool.clone());
            let dismissed =
                NotificationRepo::dismiss(uow.tx().await?, notification_id, user_id, role_id)
                    .await?;
            uow.commit().await?;
            if dismissed {
                Ok(ServiceResult::no_content())
            } else {
                Ok(ServiceResult::not_found("Notification", notification_id))
            }
        })
        .await
    }
}

/// Role id of the member linked to a user, if any.
async fn role_id_of(pool: &DbPool, user_id: DbId) -> Result<Option<DbId>, sqlx::Error> {
    Ok(MemberRepo::find_by_user(pool, user_id)
        .await?
        .and_then(|member| member.role_id))
}
