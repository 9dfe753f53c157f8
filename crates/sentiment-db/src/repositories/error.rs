//! Error handling utilities for repositories

use sentiment_core::DomainError;
use sqlx::Error as SqlxError;
use tracing::error;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    error!(error = %e, "Database operation failed");
    DomainError::PersistenceError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
    {
        return on_unique();
    }
    map_db_error(e)
}
