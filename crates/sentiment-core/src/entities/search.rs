//! Search entity - one query execution by one user

use chrono::{DateTime, Utc};

use crate::value_objects::{Query, Snowflake};

/// A persisted query snapshot. Immutable once its results are committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub query: String,
    pub created_at: DateTime<Utc>,
}

impl Search {
    /// Create a search for a validated query, stamped with the id's issue time
    /// so that id order and `created_at` order agree
    pub fn new(id: Snowflake, user_id: Snowflake, query: Query) -> Self {
        Self {
            id,
            user_id,
            query: query.into_inner(),
            created_at: id.created_at(),
        }
    }

    /// Check if the search belongs to the given user
    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}

/// History row: a search plus aggregates over its results
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSummary {
    pub id: Snowflake,
    pub query: String,
    pub created_at: DateTime<Utc>,
    pub result_count: i64,
    /// `None` when the search has no results
    pub average_sentiment: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::SnowflakeGenerator;

    #[test]
    fn test_new_search_takes_normalized_query() {
        let query = Query::parse("  rust ").unwrap();
        let search = Search::new(Snowflake::new(10), Snowflake::new(1), query);
        assert_eq!(search.query, "rust");
        assert!(search.is_owned_by(Snowflake::new(1)));
        assert!(!search.is_owned_by(Snowflake::new(2)));
    }

    #[test]
    fn test_created_at_follows_id_order() {
        let generator = SnowflakeGenerator::new(1);
        let searches: Vec<Search> = (0..50)
            .map(|_| {
                Search::new(
                    generator.generate(),
                    Snowflake::new(1),
                    Query::parse("rust").unwrap(),
                )
            })
            .collect();

        for pair in searches.windows(2) {
            assert!(pair[0].id < pair[1].id);
            assert!(pair[0].created_at <= pair[1].created_at);
        }
        let first = &searches[0];
        assert_eq!(first.created_at.timestamp_millis(), first.id.timestamp_millis());
    }
}
