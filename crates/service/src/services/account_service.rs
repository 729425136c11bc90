//! Account lifecycle: registration, sign-in, sign-out and password
//! reset.
//!
//! Registration creates the account and its team member profile in one
//! transaction. Reset tokens are random UUIDs handed to the caller once;
//! only their SHA-256 digest is stored.

use atelier_core::hashing::sha256_hex;
use atelier_core::types::DbId;
use atelier_db::models::member::CreateMember;
use atelier_db::models::password_reset::{ForgotPassword, ResetPassword};
use atelier_db::models::user::{Credentials, RegisterUser};
use atelier_db::repositories::{
    MemberRepo, PasswordResetRepo, RoleRepo, SessionRepo, UserRepo,
};
use atelier_db::{DbPool, UnitOfWork};
use chrono::{Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::mappers::user::{self, ProfileView, UserView};
use crate::password::{hash_password, validate_strength, verify_password};
use crate::result::{run, ServiceResult};
use crate::services::profile_service::profile_of;
use crate::storage;

/// How long a password reset token stays valid.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Payload returned by a successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct SignedInUser {
    pub user: UserView,
    /// Role name of the linked member, when one is assigned.
    pub role: Option<String>,
}

/// Outcome of a password reset request. The message never reveals
/// whether the email matched an account.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetIssued {
    pub message: String,
    /// The plaintext token, for delivery out of band. Never serialized.
    #[serde(skip)]
    pub token: Option<String>,
}

/// Account business operations.
pub struct AccountService;

impl AccountService {
    /// Register an account together with its team member profile.
    ///
    /// An existing unlinked member with the same email is adopted;
    /// otherwise a fresh member with a default avatar is created. Both
    /// writes commit atomically with the account row.
    pub async fn register(pool: &DbPool, form: RegisterUser) -> ServiceResult<ProfileView> {
        run(async {
            let form = user::sanitize_registration(form);
            if let Err(message) = validate_strength(&form.password) {
                return Ok(ServiceResult::bad_request(message));
            }
            if UserRepo::email_taken(pool, &form.email).await? {
                return Ok(ServiceResult::conflict(
                    "An account with this email already exists",
                ));
            }
            let password_hash = match hash_password(&form.password) {
                Ok(hash) => hash,
                Err(err) => return Ok(ServiceResult::internal(err)),
            };

            let mut uow = UnitOfWork::new(pool.clone());
            let account = UserRepo::create(
                uow.tx().await?,
                &form.email,
                &form.first_name,
                &form.last_name,
                &password_hash,
            )
            .await?;

            let mut member = match MemberRepo::find_by_email(uow.tx().await?, &form.email).await? {
                Some(existing) if existing.user_id.is_none() => existing,
                Some(_) => {
                    return Ok(ServiceResult::conflict(
                        "A member with this email is already linked to another account",
                    ));
                }
                None => {
                    MemberRepo::create(
                        uow.tx().await?,
                        &CreateMember {
                            first_name: form.first_name.clone(),
                            last_name: form.last_name.clone(),
                            email: form.email.clone(),
                            phone: None,
                            date_of_birth: None,
                            role_id: None,
                            address_id: None,
                            image_path: Some(storage::random_avatar().to_string()),
                        },
                    )
                    .await?
                }
            };
            member.user_id = Some(account.id);
            if MemberRepo::update(uow.tx().await?, &member).await?.is_none() {
                return Ok(ServiceResult::internal("member row vanished during registration"));
            }
            uow.commit().await?;

            let view = profile_of(pool, &account).await?;
            Ok(ServiceResult::created(view))
        })
        .await
    }

    /// Check credentials and stamp the login. The failure message never
    /// reveals whether the email or the password was wrong.
    pub async fn sign_in(pool: &DbPool, credentials: Credentials) -> ServiceResult<SignedInUser> {
        run(async {
            let Some(account) = UserRepo::find_by_email(pool, credentials.email.trim()).await?
            else {
                return Ok(ServiceResult::unauthorized("Invalid email or password"));
            };
            match verify_password(&credentials.password, &account.password_hash) {
                Ok(true) => {}
                Ok(false) => {
                    return Ok(ServiceResult::unauthorized("Invalid email or password"));
                }
                Err(err) => return Ok(ServiceResult::internal(err)),
            }

            let mut uow = UnitOfWork::new(pool.clone());
            UserRepo::record_login(uow.tx().await?, account.id).await?;
            uow.commit().await?;

            let refreshed = UserRepo::find_by_id(pool, account.id).await?.unwrap_or(account);
            let role = role_name_of(pool, refreshed.id).await?;
            Ok(ServiceResult::ok(SignedInUser {
                user: user::to_view(&refreshed),
                role,
            }))
        })
        .await
    }

    /// Load the signed-in view of an account by id, with its current
    /// role. Used when a refresh token is exchanged for new tokens.
    pub async fn session_user(pool: &DbPool, user_id: DbId) -> ServiceResult<SignedInUser> {
        run(async {
            let Some(account) = UserRepo::find_by_id(pool, user_id).await? else {
                return Ok(ServiceResult::not_found("User", user_id));
            };
            let role = role_name_of(pool, account.id).await?;
            Ok(ServiceResult::ok(SignedInUser {
                user: user::to_view(&account),
                role,
            }))
        })
        .await
    }

    /// Revoke every refresh session of a user.
    pub async fn sign_out(pool: &DbPool, user_id: DbId) -> ServiceResult<()> {
        run(async {
            let mut uow = UnitOfWork::new(pool.clone());
            SessionRepo::revoke_all_for_user(uow.tx().await?, user_id).await?;
            uow.commit().await?;
            Ok(ServiceResult::no_content())
        })
        .await
    }

    /// Issue a password reset token for an email, if it matches an
    /// account. The response is identical either way.
    pub async fn forgot_password(
        pool: &DbPool,
        form: ForgotPassword,
    ) -> ServiceResult<PasswordResetIssued> {
        run(async {
            const MESSAGE: &str =
                "If an account with this email exists, a reset link has been sent";

            let Some(account) = UserRepo::find_by_email(pool, form.email.trim()).await? else {
                return Ok(ServiceResult::ok(PasswordResetIssued {
                    message: MESSAGE.to_string(),
                    token: None,
                }));
            };

            let token = Uuid::new_v4().to_string();
            let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
            let mut uow = UnitOfWork::new(pool.clone());
            PasswordResetRepo::create(
                uow.tx().await?,
                account.id,
                &sha256_hex(token.as_bytes()),
                expires_at,
            )
            .await?;
            uow.commit().await?;

            Ok(ServiceResult::ok(PasswordResetIssued {
                message: MESSAGE.to_string(),
                token: Some(token),
            }))
        })
        .await
    }

    /// Redeem a reset token: set the new password, burn the token, and
    /// revoke every open session.
    pub async fn reset_password(pool: &DbPool, form: ResetPassword) -> ServiceResult<()> {
        run(async {
            if let Err(message) = validate_strength(&form.new_password) {
                return Ok(ServiceResult::bad_request(message));
            }
            let token_hash = sha256_hex(form.token.trim().as_bytes());
            let Some(token_row) = PasswordResetRepo::find_valid(pool, &token_hash).await? else {
                return Ok(ServiceResult::bad_request("Invalid or expired reset token"));
            };
            let password_hash = match hash_password(&form.new_password) {
                Ok(hash) => hash,
                Err(err) => return Ok(ServiceResult::internal(err)),
            };

            let mut uow = UnitOfWork::new(pool.clone());
            UserRepo::update_password(uow.tx().await?, token_row.user_id, &password_hash).await?;
            PasswordResetRepo::mark_used(uow.tx().await?, token_row.id).await?;
            SessionRepo::revoke_all_for_user(uow.tx().await?, token_row.user_id).await?;
            uow.commit().await?;
            Ok(ServiceResult::no_content())
        })
        .await
    }
}

/// Role name of the member linked to a user, if any.
async fn role_name_of(pool: &DbPool, user_id: DbId) -> Result<Option<String>, sqlx::Error> {
    let Some(member) = MemberRepo::find_by_user(pool, user_id).await? else {
        return Ok(None);
    };
    let Some(role_id) = member.role_id else {
        return Ok(None);
    };
    Ok(RoleRepo::find_by_id(pool, role_id).await?.map(|role| role.name))
}
