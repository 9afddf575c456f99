//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use stats_core::error::DomainError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// CHECK constraint failures mean a counter would have gone negative
pub fn map_check_violation(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_check_violation() {
            return DomainError::InvalidCounter(db_err.message().to_string());
        }
    }
    map_db_error(e)
}
