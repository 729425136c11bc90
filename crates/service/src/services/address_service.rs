//! Address lookup operations.

use atelier_core::types::DbId;
use atelier_db::models::address::{CreateAddress, UpdateAddress};
use atelier_db::repositories::AddressRepo;
use atelier_db::{DbPool, UnitOfWork};

use crate::mappers::address::{self, AddressView};
use crate::result::{run, ServiceResult};

/// Address business operations.
pub struct AddressService;

impl AddressService {
    /// Create an address.
    pub async fn create(pool: &DbPool, form: CreateAddress) -> ServiceResult<AddressView> {
        run(async {
            let form = address::sanitize(form);
            let mut uow = UnitOfWork::new(pool.clone());
            let created = AddressRepo::create(uow.tx().await?, &form).await?;
            uow.commit().await?;
            Ok(ServiceResult::created(address::to_view(&created)))
        })
        .await
    }

    /// Fetch one address.
    pub async fn get(pool: &DbPool, id: DbId) -> ServiceResult<AddressView> {
        run(async {
            match AddressRepo::find_by_id(pool, id).await? {
                Some(found) => Ok(ServiceResult::ok(address::to_view(&found))),
                None => Ok(ServiceResult::not_found("Address", id)),
            }
        })
        .await
    }

    /// List every address, ordered by city.
    pub async fn list(pool: &DbPool) -> ServiceResult<Vec<AddressView>> {
        run(async {
            let addresses = AddressRepo::list(pool).await?;
            Ok(ServiceResult::ok(
                addresses.iter().map(address::to_view).collect(),
            ))
        })
        .await
    }

    /// Replace an address's fields.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        form: UpdateAddress,
    ) -> ServiceResult<AddressView> {
        run(async {
            let Some(mut existing) = AddressRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Address", id));
            };
            address::apply_update(&mut existing, form);

            let mut uow = UnitOfWork::new(pool.clone());
            let updated = AddressRepo::update(uow.tx().await?, &existing).await?;
            uow.commit().await?;
            match updated {
                Some(row) => Ok(ServiceResult::ok(address::to_view(&row))),
                None => Ok(ServiceResult::not_found("Address", id)),
            }
        })
        .await
    }

    /// Delete an address. Members that used it fall back to no address.
    pub async fn delete(pool: &DbPool, id: DbId) -> ServiceResult<()> {
        run(async {
            let mut uow = UnitOfWork::new(pool.clone());
            let removed = AddressRepo::delete(uow.tx().await?, id).await?;
            uow.commit().await?;
            if removed {
                Ok(ServiceResult::no_content())
            } else {
                Ok(ServiceResult::not_found("Address", id))
            }
        })
        .await
    }
}
