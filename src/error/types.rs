/**
 * API Error Types
 *
 * This module defines the error taxonomy for the API. Every failure a
 * handler can produce is one of these variants, and each variant maps to
 * exactly one HTTP status code.
 *
 * # Error Categories
 *
 * - `Validation` - malformed or missing input, field-level (400)
 * - `DuplicateEmail` - signup with an already-registered email (400)
 * - `Conflict` - uniqueness violations on resources (409)
 * - `InvalidCredentials` / `InvalidToken` - authentication failures (401)
 * - `NotFound` - missing records, including ownership mismatches (404)
 * - `Unavailable` - database not configured (503)
 * - `Database` / `Internal` - unexpected server-side failures (500)
 *
 * # Existence Leakage
 *
 * Ownership mismatches deliberately surface as `NotFound`, never as a
 * forbidden error: the existence of other users' records must not be
 * revealed.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors produced by API handlers and repositories
///
/// Each variant carries enough context to build an HTTP response.
/// Conversion to a response happens in `error::conversion`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Field-level input validation failure
    #[error("{message}")]
    Validation {
        /// The request field that failed validation
        field: &'static str,
        /// Human-readable error message
        message: String,
    },

    /// A user is already registered with this email address
    /// (compared case-insensitively)
    #[error("a user is already registered with this e-mail address")]
    DuplicateEmail,

    /// Uniqueness violation on a resource
    #[error("{0}")]
    Conflict(String),

    /// Unknown identifier or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Unknown or expired bearer token
    #[error("invalid or expired token")]
    InvalidToken,

    /// Record does not exist, or is not visible to the requester
    #[error("not found")]
    NotFound,

    /// Database is not configured; data routes cannot be served
    #[error("database not configured")]
    Unavailable,

    /// Underlying database error
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Any other server-side failure (e.g. password hashing)
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a field-level validation error
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::DuplicateEmail => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The request field this error is attached to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::DuplicateEmail => Some("email"),
            _ => None,
        }
    }
}

/// Detect a unique-constraint violation from the database driver
///
/// Used by repositories to turn a store-level uniqueness failure into
/// a `Conflict` or `DuplicateEmail` before it escapes as a 500.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Detect a foreign-key violation from the database driver
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = ApiError::validation("email", "Invalid email format");
        match error {
            ApiError::Validation { field, message } => {
                assert_eq!(field, "email");
                assert_eq!(message, "Invalid email format");
            }
            _ => panic!("Expected Validation"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("name", "empty").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::DuplicateEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::conflict("pair taken").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Unavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_field_attachment() {
        assert_eq!(ApiError::validation("price", "bad tier").field(), Some("price"));
        assert_eq!(ApiError::DuplicateEmail.field(), Some("email"));
        assert_eq!(ApiError::NotFound.field(), None);
        assert_eq!(ApiError::conflict("taken").field(), None);
    }

    #[test]
    fn test_not_found_hides_ownership() {
        // Ownership mismatches must look exactly like missing records.
        let error = ApiError::NotFound;
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "not found");
    }
}
