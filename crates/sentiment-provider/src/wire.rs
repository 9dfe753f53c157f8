//! Provider response payloads

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use sentiment_core::Post;

/// Format of `created_at` in status objects, e.g. `Wed Oct 10 20:19:24 +0000 2018`
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Top-level search response. Statuses stay raw so one bad item cannot
/// fail the whole page.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    pub statuses: Vec<Value>,
    #[serde(default)]
    pub search_metadata: Option<SearchMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchMetadata {
    #[serde(default)]
    pub next_results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Status {
    id: i64,
    #[serde(default)]
    full_text: Option<String>,
    #[serde(default)]
    text: Option<String>,
    user: StatusUser,
    created_at: String,
    #[serde(default)]
    retweet_count: u32,
    #[serde(default)]
    favorite_count: u32,
}

#[derive(Debug, Deserialize)]
struct StatusUser {
    screen_name: String,
}

/// Outcome of decoding one raw status
#[derive(Debug)]
pub(crate) enum Item {
    Post(Post),
    /// Decoded, but has no usable text
    Blank,
    Malformed(String),
}

impl SearchEnvelope {
    /// Cursor for the next page: `max_id` from `next_results`, or the
    /// lowest id on this page minus one when that string carries none.
    /// `None` when the provider signals no more results.
    pub fn next_max_id(&self) -> Option<i64> {
        let next = self.search_metadata.as_ref()?.next_results.as_deref()?;
        next.trim_start_matches('?')
            .split('&')
            .find_map(|pair| pair.strip_prefix("max_id="))
            .and_then(|v| v.parse().ok())
            .or_else(|| self.min_id().map(|id| id - 1))
    }

    fn min_id(&self) -> Option<i64> {
        self.statuses
            .iter()
            .filter_map(|s| s.get("id").and_then(Value::as_i64))
            .min()
    }
}

pub(crate) fn decode_item(raw: Value) -> Item {
    let status: Status = match serde_json::from_value(raw) {
        Ok(status) => status,
        Err(e) => return Item::Malformed(e.to_string()),
    };
    let posted_at = match DateTime::parse_from_str(&status.created_at, CREATED_AT_FORMAT) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(e) => return Item::Malformed(format!("created_at {:?}: {e}", status.created_at)),
    };
    let text = status.full_text.or(status.text).unwrap_or_default();

    match Post::new(
        status.id,
        &text,
        status.user.screen_name,
        posted_at,
        status.retweet_count,
        status.favorite_count,
    ) {
        Some(post) => Item::Post(post),
        None => Item::Blank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(id: i64, text: &str) -> Value {
        json!({
            "id": id,
            "full_text": text,
            "user": { "screen_name": "dev" },
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "retweet_count": 2,
            "favorite_count": 9,
        })
    }

    #[test]
    fn test_decode_valid_status() {
        let Item::Post(post) = decode_item(status(5, "great tool")) else {
            panic!("expected post");
        };
        assert_eq!(post.provider_id, 5);
        assert_eq!(post.author, "dev");
        assert_eq!(post.posted_at.to_rfc3339(), "2018-10-10T20:19:24+00:00");
        assert_eq!((post.retweet_count, post.favorite_count), (2, 9));
    }

    #[test]
    fn test_falls_back_to_text_field() {
        let mut raw = status(1, "");
        raw["full_text"] = Value::Null;
        raw["text"] = json!("short form");
        let Item::Post(post) = decode_item(raw) else {
            panic!("expected post");
        };
        assert_eq!(post.text, "short form");
    }

    #[test]
    fn test_blank_and_malformed() {
        assert!(matches!(decode_item(status(1, "   ")), Item::Blank));

        let mut negative = status(2, "hi");
        negative["retweet_count"] = json!(-1);
        assert!(matches!(decode_item(negative), Item::Malformed(_)));

        let mut bad_date = status(3, "hi");
        bad_date["created_at"] = json!("yesterday");
        assert!(matches!(decode_item(bad_date), Item::Malformed(_)));

        assert!(matches!(decode_item(json!("nope")), Item::Malformed(_)));
    }

    #[test]
    fn test_next_max_id() {
        let envelope: SearchEnvelope = serde_json::from_value(json!({
            "statuses": [status(30, "a"), status(20, "b")],
            "search_metadata": { "next_results": "?max_id=19&q=rust&count=2" }
        }))
        .unwrap();
        assert_eq!(envelope.next_max_id(), Some(19));

        let fallback: SearchEnvelope = serde_json::from_value(json!({
            "statuses": [status(30, "a"), status(20, "b")],
            "search_metadata": { "next_results": "?q=rust" }
        }))
        .unwrap();
        assert_eq!(fallback.next_max_id(), Some(19));

        let done: SearchEnvelope = serde_json::from_value(json!({
            "statuses": [status(30, "a")],
            "search_metadata": {}
        }))
        .unwrap();
        assert_eq!(done.next_max_id(), None);
    }
}
