//! Shared domain primitives for the Atelier backend.
//!
//! This crate has no internal dependencies so it can be used by every
//! other workspace member:
//!
//! - [`types`]: database id and timestamp aliases.
//! - [`error`]: the [`CoreError`](error::CoreError) taxonomy.
//! - [`roles`]: well-known role name constants.
//! - [`themes`]: valid display theme names.
//! - [`images`]: display-image placeholders and path normalization.
//! - [`search`]: listing bounds shared by repositories and the API.
//! - [`hashing`]: SHA-256 digest for tokens stored at rest.

pub mod error;
pub mod hashing;
pub mod images;
pub mod roles;
pub mod search;
pub mod themes;
pub mod types;

pub use error::CoreError;
