//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Search, SearchResult, SearchSummary, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Search Repository
// ============================================================================

/// Pagination options for history queries
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Only searches with an id lower than this
    pub before: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Persist a search and all of its results atomically.
    ///
    /// Either everything is stored or nothing is. Results whose
    /// `search_id` differs from `search.id` are rejected up front.
    async fn save_search(&self, search: &Search, results: &[SearchResult])
        -> RepoResult<Snowflake>;

    /// List a user's searches, newest (highest id) first
    async fn list_for_user(
        &self,
        user_id: Snowflake,
        query: SearchQuery,
    ) -> RepoResult<Vec<SearchSummary>>;

    /// Find search by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Search>>;

    /// Results of a search ordered by position
    async fn find_results(&self, search_id: Snowflake) -> RepoResult<Vec<SearchResult>>;

    /// Delete a search and its results
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Number of searches a user has stored
    async fn count_for_user(&self, user_id: Snowflake) -> RepoResult<i64>;
}
