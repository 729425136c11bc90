//! Business operations for the Atelier backend.
//!
//! Every operation returns a [`ServiceResult`] envelope carrying an
//! HTTP-style status code, so the API layer translates outcomes uniformly
//! instead of interpreting errors per endpoint:
//!
//! - [`result`]: the envelope and the [`run`](result::run) adapter that
//!   turns unexpected store errors into logged 500 envelopes.
//! - [`mappers`]: pure entity-to-display-model conversion, one module
//!   per entity.
//! - [`services`]: the operations themselves, one unit of work per
//!   business transaction.
//! - [`password`]: Argon2id hashing for account credentials.
//! - [`storage`]: uploaded-file persistence and default avatars.

pub mod mappers;
pub mod password;
pub mod result;
pub mod services;
pub mod storage;

pub use result::ServiceResult;
