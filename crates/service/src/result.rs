//! The service result envelope.
//!
//! Every service method reports its outcome through [`ServiceResult`]:
//! expected failures (validation, missing rows, duplicates) are
//! success-typed envelopes with a 4xx status, while unexpected store
//! errors surface as `Err(sqlx::Error)` inside the method and are
//! converted to a logged 500 envelope by [`run`]. Dropping the open
//! [`UnitOfWork`] on that path rolls back every staged write.
//!
//! [`UnitOfWork`]: atelier_db::UnitOfWork

use std::fmt::Display;
use std::future::Future;

/// Outcome of one business operation, with an HTTP-style status code.
#[derive(Debug, Clone)]
pub struct ServiceResult<T> {
    /// Whether the operation did what was asked.
    pub succeeded: bool,
    /// HTTP-style status code describing the outcome.
    pub status_code: u16,
    /// The payload, present on success (except 204).
    pub result: Option<T>,
    /// Human-readable failure message, present on failure.
    pub error: Option<String>,
}

impl<T> ServiceResult<T> {
    /// 200 with a payload.
    pub fn ok(result: T) -> Self {
        Self {
            succeeded: true,
            status_code: 200,
            result: Some(result),
            error: None,
        }
    }

    /// 201 with the created payload.
    pub fn created(result: T) -> Self {
        Self {
            succeeded: true,
            status_code: 201,
            result: Some(result),
            error: None,
        }
    }

    /// 204 with no payload.
    pub fn no_content() -> Self {
        Self {
            succeeded: true,
            status_code: 204,
            result: None,
            error: None,
        }
    }

    /// 400 with a message describing what was wrong with the request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::failure(400, message.into())
    }

    /// 401 with a message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::failure(401, message.into())
    }

    /// 404 naming the missing entity.
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        Self::failure(404, format!("{entity} with id {id} not found"))
    }

    /// 409 with a message describing the conflicting state.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::failure(409, message.into())
    }

    /// 500 with a generic message. The detail is logged, not returned.
    pub fn internal(detail: impl Display) -> Self {
        tracing::error!(error = %detail, "service operation failed");
        Self::failure(500, "An internal error occurred".to_string())
    }

    /// Transform the payload, keeping status and error untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResult<U> {
        ServiceResult {
            succeeded: self.succeeded,
            status_code: self.status_code,
            result: self.result.map(f),
            error: self.error,
        }
    }

    fn failure(status_code: u16, message: String) -> Self {
        Self {
            succeeded: false,
            status_code,
            result: None,
            error: Some(message),
        }
    }
}

/// Execute a service operation, converting the error arm into an envelope.
///
/// Unique-constraint violations become a 409 (covers races the explicit
/// duplicate checks cannot); every other store error becomes a logged 500.
pub async fn run<T, F>(operation: F) -> ServiceResult<T>
where
    F: Future<Output = Result<ServiceResult<T>, sqlx::Error>>,
{
    match operation.await {
        Ok(outcome) => outcome,
        Err(err) => match unique_violation(&err) {
            Some(constraint) => ServiceResult::conflict(format!(
                "Duplicate value violates unique constraint {constraint}"
            )),
            None => ServiceResult::internal(err),
        },
    }
}

/// The `uq_*` constraint name when `err` is a Postgres unique violation.
fn unique_violation(err: &sqlx::Error) -> Option<String> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if db_err.code().as_deref() != Some("23505") {
        return None;
    }
    let constraint = db_err.constraint()?;
    constraint.starts_with("uq_").then(|| constraint.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_constructors_carry_codes() {
        let ok = ServiceResult::ok(5);
        assert!(ok.succeeded);
        assert_eq!(ok.status_code, 200);
        assert_eq!(ok.result, Some(5));
        assert!(ok.error.is_none());

        let created = ServiceResult::created("row");
        assert_eq!(created.status_code, 201);

        let empty: ServiceResult<()> = ServiceResult::no_content();
        assert!(empty.succeeded);
        assert_eq!(empty.status_code, 204);
        assert!(empty.result.is_none());
    }

    #[test]
    fn failure_constructors_carry_messages() {
        let bad: ServiceResult<()> = ServiceResult::bad_request("name is required");
        assert!(!bad.succeeded);
        assert_eq!(bad.status_code, 400);
        assert_eq!(bad.error.as_deref(), Some("name is required"));

        let missing: ServiceResult<()> = ServiceResult::not_found("Client", 42);
        assert_eq!(missing.status_code, 404);
        assert_eq!(missing.error.as_deref(), Some("Client with id 42 not found"));

        let conflict: ServiceResult<()> = ServiceResult::conflict("name taken");
        assert_eq!(conflict.status_code, 409);
    }

    #[test]
    fn internal_hides_detail() {
        let failed: ServiceResult<()> = ServiceResult::internal("connection refused");
        assert_eq!(failed.status_code, 500);
        assert_eq!(failed.error.as_deref(), Some("An internal error occurred"));
    }

    #[test]
    fn map_transforms_payload_only() {
        let doubled = ServiceResult::created(21).map(|n| n * 2);
        assert_eq!(doubled.status_code, 201);
        assert_eq!(doubled.result, Some(42));

        let missing: ServiceResult<i32> = ServiceResult::not_found("Role", 9);
        let mapped = missing.map(|n| n * 2);
        assert_eq!(mapped.status_code, 404);
        assert!(mapped.result.is_none());
    }

    #[tokio::test]
    async fn run_passes_envelope_through() {
        let outcome = run(async { Ok(ServiceResult::ok("fine")) }).await;
        assert!(outcome.succeeded);
        assert_eq!(outcome.result, Some("fine"));
    }

    #[tokio::test]
    async fn run_converts_store_errors_to_500() {
        let outcome: ServiceResult<()> = run(async { Err(sqlx::Error::RowNotFound) }).await;
        assert!(!outcome.succeeded);
        assert_eq!(outcome.status_code, 500);
        assert_eq!(outcome.error.as_deref(), Some("An internal error occurred"));
    }

    #[test]
    fn non_database_errors_are_not_conflicts() {
        assert!(unique_violation(&sqlx::Error::RowNotFound).is_none());
    }
}
