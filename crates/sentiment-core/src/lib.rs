//! # sentiment-core
//!
//! Domain layer containing entities, value objects, repository and provider
//! ports, and the domain error taxonomy.
//! This crate has zero dependencies on infrastructure (database, HTTP, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Post, Search, SearchResult, SearchSummary, User};
pub use error::{DomainError, ProviderError};
pub use traits::{
    PostSource, ProviderResult, RepoResult, SearchQuery, SearchRepository, SentimentScorer,
    UserRepository,
};
pub use value_objects::{
    Query, QueryError, Sentiment, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
