//! # Error Handling
//!
//! This module provides unified error handling for the back-office API: a
//! typed domain error raised by the repository layer, and a problem+json
//! response type with trace ID propagation for the HTTP layer.

use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, TransactionError};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::telemetry;

/// Typed errors raised by the repository layer.
///
/// The repositories never shape HTTP responses; they raise one of these and
/// the handler layer converts it into an [`ApiError`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// The caller's company scope is absent or not a positive identifier.
    /// Raised before any store access.
    #[error("operation requires a company scope")]
    MissingCompanyScope,

    /// A domain rule was violated (bad date range, cross-company reference,
    /// non-positive amount, unknown status value).
    #[error("{0}")]
    Validation(String),

    /// No row matches the id within the caller's company scope. Cross-company
    /// rows and soft-deleted rows are indistinguishable from absent rows.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    /// The store rejected the operation.
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl CoreError {
    /// Shorthand for a validation failure with a formatted message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<TransactionError<CoreError>> for CoreError {
    fn from(error: TransactionError<CoreError>) -> Self {
        match error {
            TransactionError::Connection(db_err) => CoreError::Database(db_err),
            TransactionError::Transaction(inner) => inner,
        }
    }
}

/// Storage constraint classes we recognize and translate to domain messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
}

/// Classifies a database error as a constraint violation, if it is one.
///
/// Uses the driver's own classification first and falls back on the raw
/// vendor codes for Postgres and SQLite.
pub fn constraint_violation(error: &DbErr) -> Option<ConstraintKind> {
    use sea_orm::RuntimeErr;

    const PG_NOT_NULL: &str = "23502";
    const PG_FOREIGN_KEY: &str = "23503";
    const PG_UNIQUE: &str = "23505";
    const SQLITE_FOREIGN_KEY: &str = "787";
    const SQLITE_NOT_NULL: &str = "1299";
    const SQLITE_UNIQUE: &[&str] = &["1555", "2067"];

    let runtime_err = match error {
        DbErr::Query(RuntimeErr::SqlxError(sqlx_err))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx_err)) => sqlx_err,
        _ => return None,
    };

    let db_error = runtime_err.as_database_error()?;

    if db_error.is_unique_violation() {
        return Some(ConstraintKind::Unique);
    }
    if db_error.is_foreign_key_violation() {
        return Some(ConstraintKind::ForeignKey);
    }

    if let Some(code) = db_error.code() {
        let code = code.as_ref();
        if code == PG_UNIQUE || SQLITE_UNIQUE.contains(&code) {
            return Some(ConstraintKind::Unique);
        }
        if code == PG_FOREIGN_KEY || code == SQLITE_FOREIGN_KEY {
            return Some(ConstraintKind::ForeignKey);
        }
        if code == PG_NOT_NULL || code == SQLITE_NOT_NULL {
            return Some(ConstraintKind::NotNull);
        }
    }

    None
}

/// Unified API error response structure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip_serializing, skip_deserializing)]
    pub status: StatusCode,
    /// Error code for programmatic handling
    pub code: Box<str>,
    /// Human-readable error message
    pub message: Box<str>,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<serde_json::Value>>,
    /// Correlation trace ID for debugging (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<Box<str>>,
}

impl ApiError {
    /// Create a new API error with the given status code and message
    pub fn new<S: Into<String>>(status: StatusCode, code: S, message: S) -> Self {
        Self {
            status,
            code: code.into().into_boxed_str(),
            message: message.into().into_boxed_str(),
            details: None,
            trace_id: Self::current_trace_id(),
        }
    }

    /// Add details to the error
    pub fn with_details<V: Into<serde_json::Value>>(mut self, details: V) -> Self {
        self.details = Some(Box::new(details.into()));
        self
    }

    /// Extract current trace ID from the active request context (falls back to
    /// a generated correlation ID)
    fn current_trace_id() -> Option<Box<str>> {
        telemetry::current_trace_id()
            .map(|trace_id| trace_id.into_boxed_str())
            .or_else(|| {
                Some(format!("corr-{}", &uuid::Uuid::new_v4().to_string()[..8]).into_boxed_str())
            })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/problem+json"),
        );

        (self.status, headers, axum::Json(self)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MissingCompanyScope => ApiError::new(
                StatusCode::BAD_REQUEST,
                "COMPANY_SCOPE_REQUIRED",
                "operation requires a company scope",
            ),
            CoreError::Validation(message) => {
                ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", &message)
            }
            CoreError::NotFound { resource, id } => ApiError::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                &format!("{resource} {id} not found"),
            ),
            CoreError::Database(db_err) => match constraint_violation(&db_err) {
                Some(ConstraintKind::Unique) => {
                    tracing::debug!(?db_err, "Unique constraint violation detected");
                    ApiError::new(StatusCode::CONFLICT, "CONFLICT", "resource already exists")
                }
                Some(ConstraintKind::ForeignKey) => ApiError::new(
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_FAILED",
                    "referenced record does not exist",
                ),
                Some(ConstraintKind::NotNull) => ApiError::new(
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_FAILED",
                    "a required field is missing",
                ),
                None => {
                    tracing::error!("Database error: {:?}", db_err);
                    ApiError::new(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_SERVER_ERROR",
                        "Database error occurred",
                    )
                }
            },
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(error: DbErr) -> Self {
        CoreError::Database(error).into()
    }
}

/// Create an unauthorized error (401)
pub fn unauthorized(message: Option<&str>) -> ApiError {
    let msg = message.unwrap_or("Authentication required");
    ApiError::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
}

/// Create a validation error with field details
pub fn validation_error(message: &str, field_errors: serde_json::Value) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message).with_details(field_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_company_scope_maps_to_400() {
        let api_error: ApiError = CoreError::MissingCompanyScope.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.code, Box::from("COMPANY_SCOPE_REQUIRED"));
    }

    #[test]
    fn validation_maps_to_400_with_message() {
        let api_error: ApiError =
            CoreError::validation("end_date must be greater than start_date").into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.code, Box::from("VALIDATION_FAILED"));
        assert!(api_error.message.contains("end_date"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let api_error: ApiError = CoreError::NotFound {
            resource: "school year",
            id: 42,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.code, Box::from("NOT_FOUND"));
        assert!(api_error.message.contains("42"));
    }

    #[test]
    fn unclassified_database_error_is_suppressed() {
        let api_error: ApiError =
            CoreError::Database(DbErr::Custom("connection reset".to_string())).into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.code, Box::from("INTERNAL_SERVER_ERROR"));
        // The raw driver message never reaches the caller.
        assert!(!api_error.message.contains("connection reset"));
    }

    #[test]
    fn non_sqlx_errors_are_not_constraint_violations() {
        assert_eq!(
            constraint_violation(&DbErr::Custom("anything".to_string())),
            None
        );
        assert_eq!(
            constraint_violation(&DbErr::RecordNotFound("row".to_string())),
            None
        );
    }

    #[test]
    fn validation_error_carries_details() {
        let error = validation_error("Validation failed", json!({"title": "required"}));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.details, Some(Box::new(json!({"title": "required"}))));
    }

    #[test]
    fn trace_id_falls_back_to_correlation_id() {
        let error = ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", "test");
        let trace_id = error.trace_id.expect("trace id should be generated");
        assert!(trace_id.starts_with("corr-"));
    }

    #[test]
    fn response_uses_problem_json() {
        let error = ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", "missing");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/problem+json"
        );
    }
}
