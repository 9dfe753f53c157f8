//! Search service
//!
//! Runs the sentiment search pipeline (validate, fetch, score, persist)
//! and serves a user's search history.

use sentiment_core::{
    DomainError, Post, Query, Search, SearchQuery, SearchResult, Snowflake,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::dto::{HistoryParams, PaginatedResponse, SearchResponse, SearchSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::scoring::{score_posts, ScoredPost};

/// A committed search and its results in position order
#[derive(Debug, Clone)]
pub struct CompletedSearch {
    pub search: Search,
    pub results: Vec<SearchResult>,
}

/// Search service
pub struct SearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SearchService<'a> {
    /// Create a new SearchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run a search for `user_id` and return its results in fetch order.
    ///
    /// Dropping the returned future before it completes persists nothing.
    pub async fn run_search(
        &self,
        user_id: Snowflake,
        query: &str,
    ) -> ServiceResult<Vec<SearchResult>> {
        self.submit(user_id, query, &CancellationToken::new())
            .await
            .map(|done| done.results)
    }

    /// Like [`run_search`](Self::run_search), but stops with
    /// `DomainError::Cancelled` once `cancel` fires during fetch or scoring.
    pub async fn run_search_with_cancel(
        &self,
        user_id: Snowflake,
        query: &str,
        cancel: &CancellationToken,
    ) -> ServiceResult<Vec<SearchResult>> {
        self.submit(user_id, query, cancel)
            .await
            .map(|done| done.results)
    }

    /// Run the pipeline and return the committed search with its results.
    ///
    /// Cancellation is honored up to the save; the save itself is one
    /// transaction and either commits or leaves nothing behind.
    #[instrument(skip(self, cancel), fields(user_id = %user_id))]
    pub async fn submit(
        &self,
        user_id: Snowflake,
        query: &str,
        cancel: &CancellationToken,
    ) -> ServiceResult<CompletedSearch> {
        let query = Query::parse(query).map_err(DomainError::from)?;
        if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(user_id).into());
        }

        let scored = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                info!("Search cancelled before save");
                return Err(DomainError::Cancelled.into());
            }
            scored = self.fetch_and_score(&query) => scored?,
        };

        let search = Search::new(self.ctx.generate_id(), user_id, query);
        let results: Vec<SearchResult> = scored
            .into_iter()
            .map(|s| {
                SearchResult::from_post(
                    self.ctx.generate_id(),
                    search.id,
                    s.index as i32,
                    s.post,
                    s.sentiment,
                )
            })
            .collect();

        self.ctx.search_repo().save_search(&search, &results).await?;
        info!(search_id = %search.id, results = results.len(), "Search saved");

        Ok(CompletedSearch { search, results })
    }

    async fn fetch_and_score(&self, query: &Query) -> ServiceResult<Vec<ScoredPost>> {
        let config = self.ctx.pipeline();
        let fetched = self
            .ctx
            .post_source()
            .fetch_posts(query.as_str(), config.fetch_limit)
            .await
            .map_err(|e| {
                warn!(error = %e, code = e.code(), "Post fetch failed");
                DomainError::from(e)
            })?;

        // Normalize again: blank posts are dropped, long ones cut to size
        let fetched_count = fetched.len();
        let posts: Vec<Post> = fetched
            .into_iter()
            .filter_map(|p| {
                Post::new(
                    p.provider_id,
                    &p.text,
                    p.author,
                    p.posted_at,
                    p.retweet_count,
                    p.favorite_count,
                )
            })
            .collect();
        if posts.len() < fetched_count {
            debug!(dropped = fetched_count - posts.len(), "Dropped blank posts");
        }

        score_posts(self.ctx.scorer(), posts, config.parallel_threshold).await
    }

    /// A page of the user's searches, newest first
    #[instrument(skip(self))]
    pub async fn list_history(
        &self,
        user_id: Snowflake,
        params: HistoryParams,
    ) -> ServiceResult<PaginatedResponse<SearchSummaryResponse>> {
        let limit = params.limit();
        let mut rows = self
            .ctx
            .search_repo()
            .list_for_user(
                user_id,
                SearchQuery {
                    before: params.before,
                    limit: limit + 1,
                },
            )
            .await?;

        let has_more = rows.len() as i64 > limit;
        rows.truncate(limit as usize);
        let before = if has_more {
            rows.last().map(|s| s.id.to_string())
        } else {
            None
        };

        Ok(PaginatedResponse::new(
            rows.into_iter().map(SearchSummaryResponse::from).collect(),
            before,
            has_more,
            limit,
        ))
    }

    /// One of the user's searches with its results.
    ///
    /// Searches owned by someone else are reported as not found.
    #[instrument(skip(self))]
    pub async fn get_search(
        &self,
        user_id: Snowflake,
        search_id: Snowflake,
    ) -> ServiceResult<SearchResponse> {
        let search = self.owned_search(user_id, search_id).await?;
        let results = self.ctx.search_repo().find_results(search.id).await?;
        Ok(SearchResponse::new(&search, &results))
    }

    /// Delete one of the user's searches and its results
    #[instrument(skip(self))]
    pub async fn delete_search(&self, user_id: Snowflake, search_id: Snowflake) -> ServiceResult<()> {
        let search = self.owned_search(user_id, search_id).await?;
        self.ctx.search_repo().delete(search.id).await?;
        info!(search_id = %search_id, "Search deleted");
        Ok(())
    }

    async fn owned_search(&self, user_id: Snowflake, search_id: Snowflake) -> ServiceResult<Search> {
        self.ctx
            .search_repo()
            .find_by_id(search_id)
            .await?
            .filter(|s| s.is_owned_by(user_id))
            .ok_or_else(|| DomainError::SearchNotFound(search_id).into())
    }
}
