//! Test fixtures and data generators
//!
//! Request/response shapes for the REST API and provider payloads for the
//! mock post source.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Provider search endpoint
pub const SEARCH_PATH: &str = "/1.1/search/tweets.json";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a suffix unique within this run and across runs against the same database
pub fn unique_suffix() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}{n}", Utc::now().timestamp_micros() % 1_000_000_000)
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        Self {
            username: format!("it_{}", unique_suffix()),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Search submission
#[derive(Debug, Serialize)]
pub struct CreateSearchRequest {
    pub query: String,
}

impl CreateSearchRequest {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

/// One scored post
#[derive(Debug, Deserialize)]
pub struct ResultResponse {
    pub text: String,
    pub sentiment: f64,
    pub user: String,
    pub created_at: DateTime<Utc>,
    pub retweet_count: u32,
    pub favorite_count: u32,
}

/// A stored search with its results
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub id: String,
    pub query: String,
    pub results: Vec<ResultResponse>,
}

/// History entry
#[derive(Debug, Deserialize)]
pub struct SearchSummary {
    pub id: String,
    pub query: String,
    pub result_count: i64,
    pub average_sentiment: Option<f64>,
}

/// Cursor metadata of a history page
#[derive(Debug, Deserialize)]
pub struct PaginationMeta {
    pub before: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

/// History page
#[derive(Debug, Deserialize)]
pub struct HistoryPage {
    pub data: Vec<SearchSummary>,
    pub pagination: PaginationMeta,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// A provider status object
pub fn status(id: i64, text: &str) -> Value {
    json!({
        "id": id,
        "full_text": text,
        "user": { "screen_name": format!("user{id}") },
        "created_at": "Mon Jan 06 12:00:00 +0000 2025",
        "retweet_count": 3,
        "favorite_count": 5,
    })
}

/// A final provider page (no further cursor)
pub fn last_page(statuses: Vec<Value>) -> Value {
    json!({ "statuses": statuses, "search_metadata": {} })
}
