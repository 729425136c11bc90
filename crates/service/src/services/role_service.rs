//! Role lookup operations.

use atelier_core::types::DbId;
use atelier_db::models::role::{CreateRole, UpdateRole};
use atelier_db::repositories::RoleRepo;
use atelier_db::{DbPool, UnitOfWork};

use crate::mappers::role::{self, RoleView};
use crate::result::{run, ServiceResult};

/// Role business operations.
pub struct RoleService;

impl RoleService {
    /// Create a role with a unique name.
    pub async fn create(pool: &DbPool, form: CreateRole) -> ServiceResult<RoleView> {
        run(async {
            let form = role::sanitize(form);
            if RoleRepo::name_taken(pool, &form.name, None).await? {
                return Ok(ServiceResult::conflict(format!(
                    "A role named \"{}\" already exists",
                    form.name
                )));
            }

            let mut uow = UnitOfWork::new(pool.clone());
            let created = RoleRepo::create(uow.tx().await?, &form).await?;
            uow.commit().await?;
            Ok(ServiceResult::created(role::to_view(&created)))
        })
        .await
    }

    /// Fetch one role.
    pub async fn get(pool: &DbPool, id: DbId) -> ServiceResult<RoleView> {
        run(async {
            match RoleRepo::find_by_id(pool, id).await? {
                Some(found) => Ok(ServiceResult::ok(role::to_view(&found))),
                None => Ok(ServiceResult::not_found("Role", id)),
            }
        })
        .await
    }

    /// List every role in seed order.
    pub async fn list(pool: &DbPool) -> ServiceResult<Vec<RoleView>> {
        run(async {
            let roles = RoleRepo::list(pool).await?;
            Ok(ServiceResult::ok(roles.iter().map(role::to_view).collect()))
        })
        .await
    }

    /// Rename a role.
    pub async fn update(pool: &DbPool, id: DbId, form: UpdateRole) -> ServiceResult<RoleView> {
        run(async {
            let Some(mut existing) = RoleRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Role", id));
            };
            if RoleRepo::name_taken(pool, form.name.trim(), Some(id)).await? {
                return Ok(ServiceResult::conflict(format!(
                    "A role named \"{}\" already exists",
                    form.name.trim()
                )));
            }
            role::apply_update(&mut existing, form);

            let mut uow = UnitOfWork::new(pool.clone());
            let updated = RoleRepo::update(uow.tx().await?, &existing).await?;
            uow.commit().await?;
            match updated {
                Some(row) => Ok(ServiceResult::ok(role::to_view(&row))),
                None => Ok(ServiceResult::not_found("Role", id)),
            }
        })
        .await
    }

    /// Delete a role. Members holding it fall back to no role.
    pub async fn delete(pool: &DbPool, id: DbId) -> ServiceResult<()> {
        run(async {
            let mut uow = UnitOfWork::new(pool.clone());
            let removed = RoleRepo::delete(uow.tx().await?, id).await?;
            uow.commit().await?;
            if removed {
                Ok(ServiceResult::no_content())
            } else {
                Ok(ServiceResult::not_found("Role", id))
            }
        })
        .await
    }
}
