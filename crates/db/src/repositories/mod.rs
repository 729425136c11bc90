//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept any Postgres executor as the first argument, so the same query
//! runs against the pool directly or inside an open
//! [`UnitOfWork`](crate::UnitOfWork) transaction.

pub mod address_repo;
pub mod client_repo;
pub mod member_repo;
pub mod notification_repo;
pub mod password_reset_repo;
pub mod project_repo;
pub mod role_repo;
pub mod session_repo;
pub mod status_repo;
pub mod user_repo;

pub use address_repo::AddressRepo;
pub use client_repo::ClientRepo;
pub use member_repo::MemberRepo;
pub use notification_repo::NotificationRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use project_repo::ProjectRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use status_repo::StatusRepo;
pub use user_repo::UserRepo;
