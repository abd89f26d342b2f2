//! Custom error types for the API service
//!
//! Every handler returns `Result<_, ApiError>`; known error kinds map to
//! their status code and message, anything else is masked to a generic
//! 500 in production and detailed outside it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::config::Environment;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// User-correctable input problem
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid, expired, or mismatched credential
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but insufficient role
    #[error("{0}")]
    Forbidden(String),

    /// Resource id/slug absent
    #[error("{0}")]
    NotFound(String),

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),

    /// Unexpected/unmapped failure
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(common::error::DatabaseError::Query(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures are masked in production; the detail goes
        // to the log either way.
        let detail = match &self {
            ApiError::Database(err) => Some(format!("{err:?}")),
            ApiError::Internal(err) => Some(format!("{err:?}")),
            _ => None,
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        let mut body = json!({
            "success": false,
            "message": message,
        });

        if !Environment::from_env().is_production() {
            if let Some(detail) = detail {
                body["stack"] = json!(detail);
            }
        }

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::validation("Title is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("Authentication required").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("Access denied. Owner privileges required.").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("Blog not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = ApiError::not_found("Project not found");
        assert_eq!(err.to_string(), "Project not found");
    }
}
