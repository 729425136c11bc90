//! Business operations, one module per aggregate.
//!
//! Services are zero-sized structs mirroring the repository layer. Each
//! method sanitizes its input, runs the business checks, performs writes
//! through a [`UnitOfWork`](atelier_db::UnitOfWork), and reports the
//! outcome as a [`ServiceResult`](crate::ServiceResult). Reads that need
//! no transaction go straight to the pool.

pub mod account_service;
pub mod address_service;
pub mod client_service;
pub mod member_service;
pub mod notification_service;
pub mod profile_service;
pub mod project_service;
pub mod role_service;
pub mod status_service;

pub use account_service::AccountService;
pub use address_service::AddressService;
pub use client_service::ClientService;
pub use member_service::MemberService;
pub use notification_service::NotificationService;
pub use profile_service::ProfileService;
pub use project_service::ProjectService;
pub use role_service::RoleService;
pub use status_service::StatusService;
