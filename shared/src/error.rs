use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    InvalidTargetStatus(String),
    #[error("{0}")]
    SlotCapacityError(String),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("Authentication required")]
    UnauthenticatedError,
    #[error("Invalid credentials")]
    LoginFailed,
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("transaction error")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation error")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("{0}")]
    NoRowsAffectedError(String),
    #[error("key value store error")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("password hash error")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ExternalServiceError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ValidationError(report) => {
                let body = json!({
                    "message": "Validation failed",
                    "errors": field_errors(&report),
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::InvalidTargetStatus(message) => {
                error_body(StatusCode::BAD_REQUEST, &message)
            }
            AppError::SlotCapacityError(message) => error_body(StatusCode::CONFLICT, &message),
            AppError::UnprocessableEntity(message) => {
                error_body(StatusCode::UNPROCESSABLE_ENTITY, &message)
            }
            AppError::EntityNotFound(message) => error_body(StatusCode::NOT_FOUND, &message),
            AppError::UnauthenticatedError | AppError::LoginFailed => {
                error_body(StatusCode::UNAUTHORIZED, &self.to_string())
            }
            e => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error. Please try again later.",
                )
            }
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

/// Flattens a garde report into a field-keyed error map. Struct fields are
/// snake_case internally but the HTTP surface speaks camelCase, so keys are
/// converted; the first error per field wins.
pub fn field_errors(report: &garde::Report) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for (path, error) in report.iter() {
        errors
            .entry(snake_to_camel(&path.to_string()))
            .or_insert_with(|| error.to_string());
    }
    errors
}

fn snake_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_paths_become_camel_case() {
        assert_eq!(snake_to_camel("first_name"), "firstName");
        assert_eq!(snake_to_camel("special_requests"), "specialRequests");
        assert_eq!(snake_to_camel("email"), "email");
    }
}
