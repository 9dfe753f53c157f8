//! Search and result database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the searches table
#[derive(Debug, Clone, FromRow)]
pub struct SearchModel {
    pub id: i64,
    pub user_id: i64,
    pub query: String,
    pub created_at: DateTime<Utc>,
}

/// Search joined with aggregates over its results
#[derive(Debug, Clone, FromRow)]
pub struct SearchSummaryModel {
    pub id: i64,
    pub query: String,
    pub created_at: DateTime<Utc>,
    pub result_count: i64,
    pub average_sentiment: Option<f64>,
}

/// Row of the search_results table
#[derive(Debug, Clone, FromRow)]
pub struct SearchResultModel {
    pub id: i64,
    pub search_id: i64,
    pub position: i32,
    pub text: String,
    pub sentiment: f64,
    pub author: String,
    pub posted_at: DateTime<Utc>,
    pub retweet_count: i64,
    pub favorite_count: i64,
}
