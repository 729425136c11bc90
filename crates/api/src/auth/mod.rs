//! Token plumbing for the authentication endpoints.
//!
//! Password hashing lives in `atelier_service::password`; this module only
//! covers the token formats the HTTP layer mints and checks.

pub mod jwt;
