//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Period;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(i64),

    #[error("Member {identity} not found in {period}")]
    MemberNotFoundForIdentity { identity: String, period: Period },

    #[error("No reactions recorded in {0}")]
    NoActivity(Period),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Member identity must not be empty")]
    InvalidIdentity,

    #[error("Invalid counter value: {0}")]
    InvalidCounter(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Member {identity} already exists in {period}")]
    MemberAlreadyExists { identity: String, period: Period },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MemberNotFound(_) | Self::MemberNotFoundForIdentity { .. } => "UNKNOWN_MEMBER",
            Self::NoActivity(_) => "NO_ACTIVITY",

            // Validation
            Self::InvalidPeriod(_) => "INVALID_PERIOD",
            Self::InvalidIdentity => "INVALID_IDENTITY",
            Self::InvalidCounter(_) => "INVALID_COUNTER",

            // Conflict
            Self::MemberAlreadyExists { .. } => "MEMBER_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound(_) | Self::MemberNotFoundForIdentity { .. } | Self::NoActivity(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidPeriod(_) | Self::InvalidIdentity | Self::InvalidCounter(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::MemberAlreadyExists { .. })
    }
}
