//! API error types and helpers.
//!
//! # Purpose
//! Centralizes HTTP error response construction so every endpoint returns the
//! same `{ "error": ..., "code": ... }` body.
//!
//! # Key invariants
//! - `code` is stable and machine-readable; `error` is human-readable.
//! - Status codes align with the error category.
//! - Internal failures are logged server-side before the response is built.
use crate::api::types::ErrorResponse;
use crate::store::StoreError;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Structured API error returned by handlers.
///
/// # Example
/// ```rust
/// use axum::http::StatusCode;
/// use fulcrum::api::error::ApiError;
/// use fulcrum::api::types::ErrorResponse;
///
/// let err = ApiError {
///     status: StatusCode::NOT_FOUND,
///     body: ErrorResponse {
///         error: "Not found".to_string(),
///         code: "not_found".to_string(),
///     },
/// };
/// assert_eq!(err.status, StatusCode::NOT_FOUND);
/// ```
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn api_error(status: StatusCode, code: &str, message: &str) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            error: message.to_string(),
            code: code.to_string(),
        },
    }
}

/// Build a 404 Not Found error.
pub fn api_not_found(message: &str) -> ApiError {
    api_error(StatusCode::NOT_FOUND, "not_found", message)
}

/// Build a 409 Conflict error with a caller-provided code.
pub fn api_conflict(code: &str, message: &str) -> ApiError {
    api_error(StatusCode::CONFLICT, code, message)
}

/// Build a 400 Bad Request validation error.
pub fn api_validation_error(message: &str) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, "validation_error", message)
}

/// Build a 500 Internal Server Error from a store error.
///
/// Logs `context` together with the error and returns the error text in the
/// body.
pub fn api_internal(context: &str, err: &StoreError) -> ApiError {
    tracing::error!(error = ?err, "{context}");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", &err.to_string())
}

/// Build a 500 Internal Server Error with a fixed message.
pub fn api_internal_message(message: &str) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

/// Map a store error for a keyed lookup: missing rows become 404, conflicts
/// 409, everything else 500.
pub(crate) fn api_store_error(context: &str, err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(_) => api_not_found("Not found"),
        StoreError::Conflict(_) => api_conflict("conflict", &err.to_string()),
        err => api_internal(context, &err),
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        api_validation_error(&rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        api_validation_error(&rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_helpers_build_expected_codes() {
        let not_found = api_not_found("Not found");
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.body.code, "not_found");
        assert_eq!(not_found.body.error, "Not found");

        let conflict = api_conflict("conflict", "duplicate key: schemas_name_key");
        assert_eq!(conflict.status, StatusCode::CONFLICT);
        assert_eq!(conflict.body.code, "conflict");

        let validation = api_validation_error("LOB Name is required.");
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);
        assert_eq!(validation.body.code, "validation_error");
        assert_eq!(validation.body.error, "LOB Name is required.");
    }

    #[test]
    fn api_internal_returns_error_text() {
        let err = StoreError::Unexpected(anyhow::anyhow!("connection reset"));
        let api = api_internal("failed to list onboardings", &err);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.body.code, "internal");
        assert_eq!(api.body.error, "connection reset");
    }

    #[test]
    fn store_errors_map_to_statuses() {
        let missing = api_store_error("ctx", StoreError::NotFound("schema".into()));
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.body.error, "Not found");

        let dup = api_store_error("ctx", StoreError::Conflict("version".into()));
        assert_eq!(dup.status, StatusCode::CONFLICT);
        assert!(dup.body.error.starts_with("duplicate key"));

        let boom = api_store_error("ctx", StoreError::Unexpected(anyhow::anyhow!("boom")));
        assert_eq!(boom.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
