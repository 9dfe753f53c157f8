//! Batch scoring for fetched posts
//!
//! Small batches are scored inline. Larger ones are split into chunks and
//! scored on tokio's blocking pool; the output is always in fetch order.

use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::future::try_join_all;
use sentiment_core::{Post, Sentiment, SentimentScorer};
use tracing::{debug, warn};

use super::error::{ServiceError, ServiceResult};

/// A post with its score, tagged with its fetch index
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPost {
    pub index: usize,
    pub post: Post,
    pub sentiment: Sentiment,
}

/// Score every post, preserving fetch order.
///
/// A post whose score is not a number is dropped.
pub async fn score_posts(
    scorer: Arc<dyn SentimentScorer>,
    posts: Vec<Post>,
    parallel_threshold: usize,
) -> ServiceResult<Vec<ScoredPost>> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let indexed: Vec<(usize, Post)> = posts.into_iter().enumerate().collect();
    if indexed.len() < parallel_threshold {
        return Ok(score_chunk(scorer.as_ref(), indexed));
    }

    let workers = std::thread::available_parallelism().map_or(4, NonZeroUsize::get);
    let chunk_size = indexed.len().div_ceil(workers);
    debug!(posts = indexed.len(), chunk_size, "Scoring on blocking pool");

    let mut remaining = indexed.into_iter();
    let mut tasks = Vec::with_capacity(workers);
    loop {
        let chunk: Vec<(usize, Post)> = remaining.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        let scorer = Arc::clone(&scorer);
        tasks.push(tokio::task::spawn_blocking(move || {
            score_chunk(scorer.as_ref(), chunk)
        }));
    }

    let chunks = try_join_all(tasks)
        .await
        .map_err(|e| ServiceError::internal(format!("scoring task failed: {e}")))?;

    let mut scored: Vec<ScoredPost> = chunks.into_iter().flatten().collect();
    scored.sort_unstable_by_key(|s| s.index);
    Ok(scored)
}

fn score_chunk(scorer: &dyn SentimentScorer, chunk: Vec<(usize, Post)>) -> Vec<ScoredPost> {
    chunk
        .into_iter()
        .filter_map(|(index, post)| {
            let raw = scorer.score(&post.text);
            match Sentiment::clamped(raw) {
                Some(sentiment) => Some(ScoredPost {
                    index,
                    post,
                    sentiment,
                }),
                None => {
                    warn!(index, provider_id = post.provider_id, "Dropping unscorable post");
                    None
                }
            }
        })
        .collect()
}
