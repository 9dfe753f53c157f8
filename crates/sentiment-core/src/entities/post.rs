//! Post - one item fetched from the provider, before scoring

use chrono::{DateTime, Utc};

/// A fetched social-media post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Provider's own identifier
    pub provider_id: i64,
    pub text: String,
    pub author: String,
    pub posted_at: DateTime<Utc>,
    pub retweet_count: u32,
    pub favorite_count: u32,
}

impl Post {
    /// Maximum stored text length in characters
    pub const MAX_TEXT_CHARS: usize = 280;

    /// Build a post, normalizing its text.
    ///
    /// Returns `None` when the text is blank. Text over
    /// [`Post::MAX_TEXT_CHARS`] is cut at a character boundary.
    pub fn new(
        provider_id: i64,
        text: &str,
        author: String,
        posted_at: DateTime<Utc>,
        retweet_count: u32,
        favorite_count: u32,
    ) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let text = match text.char_indices().nth(Self::MAX_TEXT_CHARS) {
            Some((cut, _)) => text[..cut].to_owned(),
            None => text.to_owned(),
        };
        Some(Self {
            provider_id,
            text,
            author,
            posted_at,
            retweet_count,
            favorite_count,
        })
    }
}
