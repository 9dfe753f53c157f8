//! Domain errors - error types for the domain layer

use thiserror::Error;

use super::ProviderError;
use crate::value_objects::{QueryError, Snowflake};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Search not found: {0}")]
    SearchNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already taken")]
    UsernameAlreadyExists,

    // =========================================================================
    // Upstream / Pipeline Errors
    // =========================================================================
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Search cancelled")]
    Cancelled,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::SearchNotFound(_) => "UNKNOWN_SEARCH",

            // Validation
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",

            // Upstream
            Self::Provider(e) => e.code(),
            Self::Cancelled => "SEARCH_CANCELLED",

            // Infrastructure
            Self::PersistenceError(_) => "PERSISTENCE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::SearchNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidQuery(_) | Self::InvalidUsername(_) | Self::ValidationError(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameAlreadyExists)
    }

    /// Check if the failure came from the external provider or was cut short
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Provider(_) | Self::Cancelled)
    }
}
