//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` + `Validate` create form for inserts
//! - A `Deserialize` + `Validate` update form for edits
//!
//! Forms carry raw user input; the service-layer mappers normalize them
//! before anything reaches a repository.

pub mod address;
pub mod client;
pub mod member;
pub mod notification;
pub mod password_reset;
pub mod project;
pub mod role;
pub mod session;
pub mod status;
pub mod user;
