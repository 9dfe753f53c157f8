//! PostgreSQL implementation of SearchRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use sentiment_core::{
    DomainError, RepoResult, Search, SearchQuery, SearchRepository, SearchResult, SearchSummary,
    Snowflake,
};

use crate::mappers::ResultColumns;
use crate::models::{SearchModel, SearchResultModel, SearchSummaryModel};

use super::error::map_db_error;

const MAX_PAGE: i64 = 500;

/// PostgreSQL implementation of SearchRepository
#[derive(Clone)]
pub struct PgSearchRepository {
    pool: PgPool,
}

impl PgSearchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchRepository for PgSearchRepository {
    #[instrument(skip(self, search, results), fields(search_id = %search.id, results = results.len()))]
    async fn save_search(
        &self,
        search: &Search,
        results: &[SearchResult],
    ) -> RepoResult<Snowflake> {
        if let Some(stray) = results.iter().find(|r| r.search_id != search.id) {
            return Err(DomainError::ValidationError(format!(
                "result {} belongs to search {}, not {}",
                stray.id, stray.search_id, search.id
            )));
        }

        // Dropping the transaction without commit rolls it back
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO searches (id, user_id, query, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(search.id.into_inner())
        .bind(search.user_id.into_inner())
        .bind(&search.query)
        .bind(search.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let columns = ResultColumns::from(results);
        if !columns.is_empty() {
            sqlx::query(
                r"
                INSERT INTO search_results
                    (id, search_id, position, text, sentiment, author, posted_at,
                     retweet_count, favorite_count)
                SELECT * FROM UNNEST(
                    $1::BIGINT[], $2::BIGINT[], $3::INT[], $4::TEXT[], $5::FLOAT8[],
                    $6::TEXT[], $7::TIMESTAMPTZ[], $8::BIGINT[], $9::BIGINT[]
                )
                ",
            )
            .bind(&columns.ids)
            .bind(&columns.search_ids)
            .bind(&columns.positions)
            .bind(&columns.texts)
            .bind(&columns.sentiments)
            .bind(&columns.authors)
            .bind(&columns.posted_at)
            .bind(&columns.retweet_counts)
            .bind(&columns.favorite_counts)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        debug!(rows = columns.len(), "Search committed");

        Ok(search.id)
    }

    #[instrument(skip(self))]
    async fn list_for_user(
        &self,
        user_id: Snowflake,
        query: SearchQuery,
    ) -> RepoResult<Vec<SearchSummary>> {
        let limit = query.limit.clamp(1, MAX_PAGE);

        let rows = sqlx::query_as::<_, SearchSummaryModel>(
            r"
            SELECT s.id, s.query, s.created_at,
                   COUNT(r.id) AS result_count,
                   AVG(r.sentiment) AS average_sentiment
            FROM searches s
            LEFT JOIN search_results r ON r.search_id = s.id
            WHERE s.user_id = $1 AND ($2::BIGINT IS NULL OR s.id < $2)
            GROUP BY s.id
            ORDER BY s.id DESC
            LIMIT $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(SearchSummary::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Search>> {
        let result = sqlx::query_as::<_, SearchModel>(
            "SELECT id, user_id, query, created_at FROM searches WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Search::from))
    }

    #[instrument(skip(self))]
    async fn find_results(&self, search_id: Snowflake) -> RepoResult<Vec<SearchResult>> {
        let rows = sqlx::query_as::<_, SearchResultModel>(
            r"
            SELECT id, search_id, position, text, sentiment, author, posted_at,
                   retweet_count, favorite_count
            FROM search_results
            WHERE search_id = $1
            ORDER BY position ASC
            ",
        )
        .bind(search_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(SearchResult::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM searches WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::SearchNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_for_user(&self, user_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM searches WHERE user_id = $1")
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
