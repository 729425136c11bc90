//! Response envelope types shared by all API handlers.
//!
//! Every endpoint answers with one of two shapes: successful payloads ride
//! in `{ "data": ... }`, failures in `{ "error": ..., "code": ... }` where
//! `code` is a stable machine-readable string (`NOT_FOUND`, `CONFLICT`, ...).
//! Using these structs instead of ad-hoc `serde_json::json!` keeps the wire
//! format consistent and type-checked.

use serde::Serialize;

/// Standard `{ "data": T }` success envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Standard `{ "error", "code" }` failure envelope.
///
/// `code` is one of the fixed identifiers produced by
/// [`crate::error::AppError`] and [`crate::error::respond`]; clients branch
/// on it rather than on the human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}
