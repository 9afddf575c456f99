//! Application error types
//!
//! Unified error handling for the entire application.

use serde::Serialize;
use stats_core::DomainError;

/// Application-wide error type
///
/// Everything that can end a request or stop startup funnels through here.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Pool creation or migration failure
    #[error("Database error: {0}")]
    Database(String),

    /// The chat platform refused or never answered
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Domain(e) => Self::status_code_for(e),
            Self::ExternalService(_) => 502,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// HTTP status code for a bare domain error
    ///
    /// Shared with the service and HTTP layers so every path agrees.
    #[must_use]
    pub fn status_code_for(err: &DomainError) -> u16 {
        if err.is_not_found() {
            404
        } else if err.is_validation() {
            400
        } else if err.is_conflict() {
            409
        } else {
            500
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Domain(e) => e.code(),
            Self::Database(_) => "DATABASE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the detail must stay out of response bodies
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Error response structure for API responses
///
/// Server errors carry a generic message; internal detail stays in the logs.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let message = if err.is_server_error() {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };
        Self {
            code: err.error_code().to_string(),
            message,
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
