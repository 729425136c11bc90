//! Signed-in account profile operations.

use atelier_core::themes::is_valid_theme;
use atelier_core::types::DbId;
use atelier_db::models::user::{UpdateTheme, User};
use atelier_db::repositories::{AddressRepo, MemberRepo, RoleRepo, UserRepo};
use atelier_db::{DbPool, UnitOfWork};

use crate::mappers::member;
use crate::mappers::user::{self, ProfileView, UserView};
use crate::result::{run, ServiceResult};

/// Profile business operations for the signed-in user.
pub struct ProfileService;

impl ProfileService {
    /// Fetch the caller's profile: account plus linked member, when one
    /// exists.
    pub async fn me(pool: &DbPool, user_id: DbId) -> ServiceResult<ProfileView> {
        run(async {
            let Some(account) = UserRepo::find_by_id(pool, user_id).await? else {
                return Ok(ServiceResult::not_found("User", user_id));
            };
            let view = profile_of(pool, &account).await?;
            Ok(ServiceResult::ok(view))
        })
        .await
    }

    /// Switch the caller's display theme.
    pub async fn update_theme(
        pool: &DbPool,
        user_id: DbId,
        form: UpdateTheme,
    ) -> ServiceResult<UserView> {
        run(async {
            let theme = form.theme.trim().to_lowercase();
            if !is_valid_theme(&theme) {
                return Ok(ServiceResult::bad_request(format!(
                    "Unknown theme \"{theme}\""
                )));
            }

            let mut uow = UnitOfWork::new(pool.clone());
            let updated = UserRepo::update_theme(uow.tx().await?, user_id, &theme).await?;
            uow.commit().await?;
            if !updated {
                return Ok(ServiceResult::not_found("User", user_id));
            }
            match UserRepo::find_by_id(pool, user_id).await? {
                Some(account) => Ok(ServiceResult::ok(user::to_view(&account))),
                None => Ok(ServiceResult::not_found("User", user_id)),
            }
        })
        .await
    }
}

/// Assemble the profile view for an account, resolving the linked
/// member's role and address.
pub(crate) async fn profile_of(pool: &DbPool, account: &User) -> Result<ProfileView, sqlx::Error> {
    let member_row = MemberRepo::find_by_user(pool, account.id).await?;
    let member_view = match &member_row {
        Some(row) => {
            let role_row = match row.role_id {
                Some(id) => RoleRepo::find_by_id(pool, id).await?,
                None => None,
            };
            let address_row = match row.address_id {
                Some(id) => AddressRepo::find_by_id(pool, id).await?,
                None => None,
            };
            Some(member::to_view(row, role_row.as_ref(), address_row.as_ref()))
        }
        None => None,
    };
    Ok(ProfileView {
        user: user::to_view(account),
        member: member_view,
    })
}
