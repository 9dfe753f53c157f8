//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use sentiment_core::{Search, SearchResult, SearchSummary, User};

use super::responses::{ResultResponse, SearchResponse, SearchSummaryResponse, UserResponse};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<&SearchResult> for ResultResponse {
    fn from(result: &SearchResult) -> Self {
        Self {
            text: result.text.clone(),
            sentiment: result.sentiment.value(),
            user: result.author.clone(),
            created_at: result.posted_at,
            retweet_count: result.retweet_count,
            favorite_count: result.favorite_count,
        }
    }
}

impl From<SearchSummary> for SearchSummaryResponse {
    fn from(summary: SearchSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            query: summary.query,
            created_at: summary.created_at,
            result_count: summary.result_count,
            average_sentiment: summary.average_sentiment,
        }
    }
}

impl SearchResponse {
    pub fn new(search: &Search, results: &[SearchResult]) -> Self {
        Self {
            id: search.id.to_string(),
            query: search.query.clone(),
            created_at: search.created_at,
            results: results.iter().map(ResultResponse::from).collect(),
        }
    }
}
