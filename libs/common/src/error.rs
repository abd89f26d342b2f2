//! Custom error types for the common library
//!
//! This module defines database error types shared by the services, plus
//! a small helper for recognizing unique-constraint violations so callers
//! can recover from slug collisions instead of surfacing a 500.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Whether an error is a unique-constraint violation on the named constraint.
///
/// Pass `None` to match a violation of any unique constraint.
pub fn is_unique_violation(err: &SqlxError, constraint: Option<&str>) -> bool {
    match err {
        SqlxError::Database(db_err) => {
            db_err.is_unique_violation()
                && constraint.is_none_or(|name| db_err.constraint() == Some(name))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&SqlxError::RowNotFound, None));
        assert!(!is_unique_violation(
            &SqlxError::PoolTimedOut,
            Some("blogs_slug_key")
        ));
    }
}
