use atelier_core::error::CoreError;
use atelier_service::ServiceResult;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::response::{DataResponse, ErrorResponse};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain failures and adds the HTTP-only cases a
/// handler can hit directly. `IntoResponse` turns every variant into the
/// standard `{ "error", "code" }` body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `atelier_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_parts()
            }
        };

        let body = ErrorResponse {
            error: message,
            code,
        };

        (status, axum::Json(body)).into_response()
    }
}

/// The one 500 shape. Details are logged before this is built, never sent.
fn internal_parts() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Map a domain error onto its HTTP status, error code, and client message.
///
/// Client-caused variants pass their message through; `Internal` is logged
/// and replaced with the generic sentence.
fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal_parts()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505.
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint().is_some_and(|c| c.starts_with("uq_"))
            {
                (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "A record with this value already exists".to_string(),
                )
            } else {
                tracing::error!(error = %db_err, "Database error");
                internal_parts()
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_parts()
        }
    }
}

/// Translate a service envelope into an HTTP response.
///
/// Successful outcomes become `{ "data": ... }` bodies (or an empty 204);
/// failures become the standard `{ "error", "code" }` shape with the
/// envelope's status.
pub fn respond<T: Serialize>(outcome: ServiceResult<T>) -> Response {
    let status =
        StatusCode::from_u16(outcome.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if outcome.succeeded {
        return match outcome.result {
            Some(payload) => (status, axum::Json(DataResponse { data: payload })).into_response(),
            None => status.into_response(),
        };
    }

    let message = outcome
        .error
        .unwrap_or_else(|| "An internal error occurred".to_string());
    let body = ErrorResponse {
        error: message,
        code: error_code(status),
    };
    (status, axum::Json(body)).into_response()
}

/// The stable error code for a failure status.
fn error_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
        StatusCode::FORBIDDEN => "FORBIDDEN",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::CONFLICT => "CONFLICT",
        _ => "INTERNAL_ERROR",
    }
}

/// Run a form's derive-based validations, flattening failures into a 400.
pub fn validated(form: &impl Validate) -> Result<(), AppError> {
    form.validate()
        .map_err(|errors| AppError::BadRequest(flatten_errors(&errors)))
}

/// Render `ValidationErrors` as a single deterministic message,
/// e.g. `"email: failed the email check; name: failed the length check"`.
fn flatten_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let detail = match field_errors.first() {
                Some(err) => err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed the {} check", err.code)),
                None => "is invalid".to_string(),
            };
            format!("{field}: {detail}")
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
