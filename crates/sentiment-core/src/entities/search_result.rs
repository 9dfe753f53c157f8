//! SearchResult entity - one scored post stored under a search

use chrono::{DateTime, Utc};

use super::Post;
use crate::value_objects::{Sentiment, Snowflake};

/// A scored post. `position` is the post's 0-based fetch index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: Snowflake,
    pub search_id: Snowflake,
    pub position: i32,
    pub text: String,
    pub sentiment: Sentiment,
    pub author: String,
    pub posted_at: DateTime<Utc>,
    pub retweet_count: u32,
    pub favorite_count: u32,
}

impl SearchResult {
    /// Attach a score to a fetched post
    pub fn from_post(
        id: Snowflake,
        search_id: Snowflake,
        position: i32,
        post: Post,
        sentiment: Sentiment,
    ) -> Self {
        Self {
            id,
            search_id,
            position,
            text: post.text,
            sentiment,
            author: post.author,
            posted_at: post.posted_at,
            retweet_count: post.retweet_count,
            favorite_count: post.favorite_count,
        }
    }
}
