//! Search and result mappers

use chrono::{DateTime, Utc};
use sentiment_core::{DomainError, Search, SearchResult, SearchSummary, Sentiment, Snowflake};

use crate::models::{SearchModel, SearchResultModel, SearchSummaryModel};

impl From<SearchModel> for Search {
    fn from(model: SearchModel) -> Self {
        Search {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            query: model.query,
            created_at: model.created_at,
        }
    }
}

impl From<SearchSummaryModel> for SearchSummary {
    fn from(model: SearchSummaryModel) -> Self {
        SearchSummary {
            id: Snowflake::new(model.id),
            query: model.query,
            created_at: model.created_at,
            result_count: model.result_count,
            average_sentiment: model.average_sentiment,
        }
    }
}

/// Rows are constrained by the schema, so failures here mean the table was
/// written by something else.
impl TryFrom<SearchResultModel> for SearchResult {
    type Error = DomainError;

    fn try_from(model: SearchResultModel) -> Result<Self, Self::Error> {
        let id = model.id;
        let corrupt =
            |field: &str| DomainError::PersistenceError(format!("result {id} has invalid {field}"));
        let sentiment = Sentiment::new(model.sentiment).ok_or_else(|| corrupt("sentiment"))?;
        let retweet_count =
            u32::try_from(model.retweet_count).map_err(|_| corrupt("retweet_count"))?;
        let favorite_count =
            u32::try_from(model.favorite_count).map_err(|_| corrupt("favorite_count"))?;

        Ok(SearchResult {
            id: Snowflake::new(model.id),
            search_id: Snowflake::new(model.search_id),
            position: model.position,
            text: model.text,
            sentiment,
            author: model.author,
            posted_at: model.posted_at,
            retweet_count,
            favorite_count,
        })
    }
}

/// Results laid out column-wise for an `UNNEST` insert
#[derive(Debug, Default)]
pub struct ResultColumns {
    pub ids: Vec<i64>,
    pub search_ids: Vec<i64>,
    pub positions: Vec<i32>,
    pub texts: Vec<String>,
    pub sentiments: Vec<f64>,
    pub authors: Vec<String>,
    pub posted_at: Vec<DateTime<Utc>>,
    pub retweet_counts: Vec<i64>,
    pub favorite_counts: Vec<i64>,
}

impl ResultColumns {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<&[SearchResult]> for ResultColumns {
    fn from(results: &[SearchResult]) -> Self {
        let mut columns = ResultColumns::default();
        for r in results {
            columns.ids.push(r.id.into_inner());
            columns.search_ids.push(r.search_id.into_inner());
            columns.positions.push(r.position);
            columns.texts.push(r.text.clone());
            columns.sentiments.push(r.sentiment.value());
            columns.authors.push(r.author.clone());
            columns.posted_at.push(r.posted_at);
            columns.retweet_counts.push(i64::from(r.retweet_count));
            columns.favorite_counts.push(i64::from(r.favorite_count));
        }
        columns
    }
}
