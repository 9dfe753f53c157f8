//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`, and body DTOs implement
//! `Validate` for input validation.

use sentiment_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Search Requests
// ============================================================================

/// Run a new search
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSearchRequest {
    /// Trimmed and checked again by the pipeline
    #[validate(length(min = 1, max = 512, message = "Query must be 1-512 characters"))]
    pub query: String,
}

/// History page parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryParams {
    /// Only searches older than this one
    pub before: Option<Snowflake>,
    pub limit: Option<i64>,
}

impl HistoryParams {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;

    /// Requested page size, clamped to `1..=MAX_LIMIT`
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}
