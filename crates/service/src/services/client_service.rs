//! Client operations.

use atelier_core::types::DbId;
use atelier_db::models::client::{CreateClient, UpdateClient};
use atelier_db::repositories::ClientRepo;
use atelier_db::{DbPool, ListSpec, UnitOfWork};

use crate::mappers::client::{self, ClientView};
use crate::result::{run, ServiceResult};

/// Client business operations.
pub struct ClientService;

impl ClientService {
    /// Create a client. Name and email must both be unused.
    pub async fn create(pool: &DbPool, form: CreateClient) -> ServiceResult<ClientView> {
        run(async {
            let form = client::sanitize(form);
            if ClientRepo::name_taken(pool, &form.name, None).await? {
                return Ok(ServiceResult::conflict(format!(
                    "A client named \"{}\" already exists",
                    form.name
                )));
            }
            if ClientRepo::email_taken(pool, &form.email, None).await? {
                return Ok(ServiceResult::conflict(format!(
                    "A client with email {} already exists",
                    form.email
                )));
            }

            let mut uow = UnitOfWork::new(pool.clone());
            let created = ClientRepo::create(uow.tx().await?, &form).await?;
            uow.commit().await?;
            Ok(ServiceResult::created(client::to_view(&created)))
        })
        .await
    }

    /// Fetch one client.
    pub async fn get(pool: &DbPool, id: DbId) -> ServiceResult<ClientView> {
        run(async {
            match ClientRepo::find_by_id(pool, id).await? {
                Some(found) => Ok(ServiceResult::ok(client::to_view(&found))),
                None => Ok(ServiceResult::not_found("Client", id)),
            }
        })
        .await
    }

    /// List every client, ordered by name.
    pub async fn list(pool: &DbPool) -> ServiceResult<Vec<ClientView>> {
        run(async {
            let clients = ClientRepo::list(pool, &ListSpec::by("name")).await?;
            Ok(ServiceResult::ok(
                clients.iter().map(client::to_view).collect(),
            ))
        })
        .await
    }

    /// Replace a client's editable fields. A blank image path keeps the
    /// stored image.
    pub async fn update(pool: &DbPool, id: DbId, form: UpdateClient) -> ServiceResult<ClientView> {
        run(async {
            let Some(mut existing) = ClientRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Client", id));
            };
            if ClientRepo::name_taken(pool, form.name.trim(), Some(id)).await? {
                return Ok(ServiceResult::conflict(format!(
                    "A client named \"{}\" already exists",
                    form.name.trim()
                )));
            }
            if ClientRepo::email_taken(pool, form.email.trim(), Some(id)).await? {
                return Ok(ServiceResult::conflict(format!(
                    "A client with email {} already exists",
                    form.email.trim()
                )));
            }
            client::apply_update(&mut existing, form);

            let mut uow = UnitOfWork::new(pool.clone());
            let updated = ClientRepo::update(uow.tx().await?, &existing).await?;
            uow.commit().await?;
            match updated {
                Some(row) => Ok(ServiceResult::ok(client::to_view(&row))),
                None => Ok(ServiceResult::not_found("Client", id)),
            }
        })
        .await
    }

    /// Delete a client and, through the cascade, its projects.
    pub async fn delete(pool: &DbPool, id: DbId) -> ServiceResult<()> {
        run(async {
            let mut uow = UnitOfWork::new(pool.clone());
            let removed = ClientRepo::delete(uow.tx().await?, id).await?;
            uow.commit().await?;
            if removed {
                Ok(ServiceResult::no_content())
            } else {
                Ok(ServiceResult::not_found("Client", id))
            }
        })
        .await
    }

    /// Point a client at a freshly uploaded image.
    pub async fn update_image(
        pool: &DbPool,
        id: DbId,
        image_path: String,
    ) -> ServiceResult<ClientView> {
        run(async {
            let Some(mut existing) = ClientRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Client", id));
            };
            existing.image_path = Some(image_path);

            let mut uow = UnitOfWork::new(pool.clone());
            let updated = ClientRepo::update(uow.tx().await?, &existing).await?;
            uow.commit().await?;
            match updated {
                Some(row) => Ok(ServiceResult::ok(client::to_view(&row))),
                None => Ok(ServiceResult::not_found("Client", id)),
            }
        })
        .await
    }
}
