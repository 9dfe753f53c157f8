//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, before: Option<String>, has_more: bool, limit: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                before,
                has_more,
                limit,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching the next (older) page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: i64,
}

// ============================================================================
// User & Auth Responses
// ============================================================================

/// User profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Token issued at registration or login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

// ============================================================================
// Search Responses
// ============================================================================

/// One scored post
#[derive(Debug, Clone, Serialize)]
pub struct ResultResponse {
    pub text: String,
    pub sentiment: f64,
    /// Author handle
    pub user: String,
    /// Provider timestamp of the post
    pub created_at: DateTime<Utc>,
    pub retweet_count: u32,
    pub favorite_count: u32,
}

/// A search with its ordered results
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub id: String,
    pub query: String,
    pub created_at: DateTime<Utc>,
    pub results: Vec<ResultResponse>,
}

/// History entry
#[derive(Debug, Clone, Serialize)]
pub struct SearchSummaryResponse {
    pub id: String,
    pub query: String,
    pub created_at: DateTime<Utc>,
    pub result_count: i64,
    pub average_sentiment: Option<f64>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_response_omits_missing_cursor() {
        let page: PaginatedResponse<u8> = PaginatedResponse::new(vec![], None, false, 20);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json["pagination"].get("before").is_none());
        assert_eq!(json["pagination"]["limit"], 20);
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        assert!(ReadinessResponse::ready(true).is_ready());
        let down = ReadinessResponse::ready(false);
        assert!(!down.is_ready());
        assert_eq!(down.checks.database, "unhealthy");
    }
}
