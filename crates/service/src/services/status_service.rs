//! Project status operations.

use atelier_core::types::DbId;
use atelier_db::models::status::{CreateStatus, UpdateStatus};
use atelier_db::repositories::StatusRepo;
use atelier_db::{DbPool, UnitOfWork};

use crate::mappers::status::{self, StatusView};
use crate::result::{run, ServiceResult};

/// Status business operations.
pub struct StatusService;

impl StatusService {
    /// Create a status with a unique name.
    pub async fn create(pool: &DbPool, form: CreateStatus) -> ServiceResult<StatusView> {
        run(async {
            let form = status::sanitize(form);
            if StatusRepo::name_taken(pool, &form.name, None).await? {
                return Ok(ServiceResult::conflict(format!(
                    "A status named \"{}\" already exists",
                    form.name
                )));
            }

            let mut uow = UnitOfWork::new(pool.clone());
            let created = StatusRepo::create(uow.tx().await?, &form).await?;
            uow.commit().await?;
            Ok(ServiceResult::created(status::from_new(&created)))
        })
        .await
    }

    /// Fetch one status with its project count.
    pub async fn get(pool: &DbPool, id: DbId) -> ServiceResult<StatusView> {
        run(async {
            match StatusRepo::find_with_count(pool, id).await? {
                Some(found) => Ok(ServiceResult::ok(status::to_view(&found))),
                None => Ok(ServiceResult::not_found("Status", id)),
            }
        })
        .await
    }

    /// List every status with its project count.
    pub async fn list(pool: &DbPool) -> ServiceResult<Vec<StatusView>> {
        run(async {
            let statuses = StatusRepo::list_with_counts(pool).await?;
            Ok(ServiceResult::ok(
                statuses.iter().map(status::to_view).collect(),
            ))
        })
        .await
    }

    /// Rename a status.
    pub async fn update(pool: &DbPool, id: DbId, form: UpdateStatus) -> ServiceResult<StatusView> {
        run(async {
            let Some(mut existing) = StatusRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Status", id));
            };
            if StatusRepo::name_taken(pool, form.name.trim(), Some(id)).await? {
                return Ok(ServiceResult::conflict(format!(
                    "A status named \"{}\" already exists",
                    form.name.trim()
                )));
            }
            status::apply_update(&mut existing, form);

            let mut uow = UnitOfWork::new(pool.clone());
            let updated = StatusRepo::update(uow.tx().await?, &existing).await?;
            uow.commit().await?;
            match updated {
                Some(row) => match StatusRepo::find_with_count(pool, row.id).await? {
                    Some(found) => Ok(ServiceResult::ok(status::to_view(&found))),
                    None => Ok(ServiceResult::ok(status::from_new(&row))),
                },
                None => Ok(ServiceResult::not_found("Status", id)),
            }
        })
        .await
    }

    /// Delete a status that no project references.
    pub async fn delete(pool: &DbPool, id: DbId) -> ServiceResult<()> {
        run(async {
            if StatusRepo::find_by_id(pool, id).await?.is_none() {
                return Ok(ServiceResult::not_found("Status", id));
            }
            if StatusRepo::in_use(pool, id).await? {
                return Ok(ServiceResult::conflict(
                    "Status is still assigned to projects and cannot be deleted",
                ));
            }

            let mut uow = UnitOfWork::new(pool.clone());
            let removed = StatusRepo::delete(uow.tx().await?, id).await?;
            uow.commit().await?;
            if removed {
                Ok(ServiceResult::no_content())
            } else {
                Ok(ServiceResult::not_found("Status", id))
            }
        })
        .await
    }
}
