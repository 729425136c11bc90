//! Team member operations.

use std::collections::HashMap;

use atelier_core::types::DbId;
use atelier_db::models::address::Address;
use atelier_db::models::member::{CreateMember, Member, UpdateMember};
use atelier_db::models::role::Role;
use atelier_db::repositories::{AddressRepo, MemberRepo, RoleRepo};
use atelier_db::{DbPool, UnitOfWork};

use crate::mappers::member::{self, MemberView};
use crate::result::{run, ServiceResult};
use crate::storage;

/// Team member business operations.
pub struct MemberService;

impl MemberService {
    /// Create a member. The email must be unused; `role_id` and
    /// `address_id` must point at existing lookup rows. Members created
    /// without an avatar get a bundled default.
    pub async fn create(pool: &DbPool, form: CreateMember) -> ServiceResult<MemberView> {
        run(async {
            let mut form = member::sanitize(form);
            if MemberRepo::email_taken(pool, &form.email, None).await? {
                return Ok(ServiceResult::conflict(format!(
                    "A member with email {} already exists",
                    form.email
                )));
            }
            let (role_row, address_row) =
                match resolve_lookups(pool, form.role_id, form.address_id).await? {
                    Ok(rows) => rows,
                    Err(message) => return Ok(ServiceResult::bad_request(message)),
                };
            if form.image_path.is_none() {
                form.image_path = Some(storage::random_avatar().to_string());
            }

            let mut uow = UnitOfWork::new(pool.clone());
            let created = MemberRepo::create(uow.tx().await?, &form).await?;
            uow.commit().await?;
            Ok(ServiceResult::created(member::to_view(
                &created,
                role_row.as_ref(),
                address_row.as_ref(),
            )))
        })
        .await
    }

    /// Fetch one member with its resolved role and address.
    pub async fn get(pool: &DbPool, id: DbId) -> ServiceResult<MemberView> {
        run(async {
            let Some(found) = MemberRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Member", id));
            };
            let view = view_one(pool, &found).await?;
            Ok(ServiceResult::ok(view))
        })
        .await
    }

    /// List members, filtered by a search term over names and email.
    /// A blank term returns everyone.
    pub async fn list(pool: &DbPool, term: &str) -> ServiceResult<Vec<MemberView>> {
        run(async {
            let members = MemberRepo::search(pool, term).await?;
            let views = assemble(pool, &members).await?;
            Ok(ServiceResult::ok(views))
        })
        .await
    }

    /// Replace a member's editable fields. A blank image path keeps
    /// the stored avatar.
    pub async fn update(pool: &DbPool, id: DbId, form: UpdateMember) -> ServiceResult<MemberView> {
        run(async {
            let Some(mut existing) = MemberRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Member", id));
            };
            if MemberRepo::email_taken(pool, form.email.trim(), Some(id)).await? {
                return Ok(ServiceResult::conflict(format!(
                    "A member with email {} already exists",
                    form.email.trim()
                )));
            }
            let (role_row, address_row) =
                match resolve_lookups(pool, form.role_id, form.address_id).await? {
                    Ok(rows) => rows,
                    Err(message) => return Ok(ServiceResult::bad_request(message)),
                };
            member::apply_update(&mut existing, form);

            let mut uow = UnitOfWork::new(pool.clone());
            let updated = MemberRepo::update(uow.tx().await?, &existing).await?;
            uow.commit().await?;
            match updated {
                Some(row) => Ok(ServiceResult::ok(member::to_view(
                    &row,
                    role_row.as_ref(),
                    address_row.as_ref(),
                ))),
                None => Ok(ServiceResult::not_found("Member", id)),
            }
        })
        .await
    }

    /// Delete a member. Project assignments cascade; a linked user
    /// account stays.
    pub async fn delete(pool: &DbPool, id: DbId) -> ServiceResult<()> {
        run(async {
            let mut uow = UnitOfWork::new(pool.clone());
            let removed = MemberRepo::delete(uow.tx().await?, id).await?;
            uow.commit().await?;
            if removed {
                Ok(ServiceResult::no_content())
            } else {
                Ok(ServiceResult::not_found("Member", id))
            }
        })
        .await
    }

    /// Point a member at a freshly uploaded avatar.
    pub async fn update_image(
        pool: &DbPool,
        id: DbId,
        image_path: String,
    ) -> ServiceResult<MemberView> {
        run(async {
            let Some(mut existing) = MemberRepo::find_by_id(pool, id).await? else {
                return Ok(ServiceResult::not_found("Member", id));
            };
            existing.image_path = Some(image_path);

            let mut uow = UnitOfWork::new(pool.clone());
            let updated = MemberRepo::update(uow.tx().await?, &existing).await?;
            uow.commit().await?;
            match updated {
                Some(row) => {
                    let view = view_one(pool, &row).await?;
                    Ok(ServiceResult::ok(view))
                }
                None => Ok(ServiceResult::not_found("Member", id)),
            }
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// Lookup resolution
// ---------------------------------------------------------------------------

/// Fetch the role and address rows a form points at.
///
/// `Err` carries the message for an id that matches nothing.
async fn resolve_lookups(
    pool: &DbPool,
    role_id: Option<DbId>,
    address_id: Option<DbId>,
) -> Result<Result<(Option<Role>, Option<Address>), String>, sqlx::Error> {
    let role_row = match role_id {
        Some(id) => match RoleRepo::find_by_id(pool, id).await? {
            Some(role) => Some(role),
            None => return Ok(Err(format!("Role {id} does not exist"))),
        },
        None => None,
    };
    let address_row = match address_id {
        Some(id) => match AddressRepo::find_by_id(pool, id).await? {
            Some(address) => Some(address),
            None => return Ok(Err(format!("Address {id} does not exist"))),
        },
        None => None,
    };
    Ok(Ok((role_row, address_row)))
}

/// Build the view for one member via point lookups.
async fn view_one(pool: &DbPool, row: &Member) -> Result<MemberView, sqlx::Error> {
    let role_row = match row.role_id {
        Some(id) => RoleRepo::find_by_id(pool, id).await?,
        None => None,
    };
    let address_row = match row.address_id {
        Some(id) => AddressRepo::find_by_id(pool, id).await?,
        None => None,
    };
    Ok(member::to_view(row, role_row.as_ref(), address_row.as_ref()))
}

/// Build views for a member listing with two lookup-table reads.
async fn assemble(pool: &DbPool, members: &[Member]) -> Result<Vec<MemberView>, sqlx::Error> {
    let roles: HashMap<DbId, Role> = RoleRepo::list(pool)
        .await?
        .into_iter()
        .map(|role| (role.id, role))
        .collect();
    let addresses: HashMap<DbId, Address> = AddressRepo::list(pool)
        .await?
        .into_iter()
        .map(|address| (address.id, address))
        .collect();
    Ok(members
        .iter()
        .map(|row| {
            member::to_view(
                row,
                row.role_id.and_then(|id| roles.get(&id)),
                row.address_id.and_then(|id| addresses.get(&id)),
            )
        })
        .collect())
}
