//! Ports - interfaces the domain needs from the outside world

mod provider;
mod repositories;
mod scoring;

pub use provider::{PostSource, ProviderResult};
pub use repositories::{RepoResult, SearchQuery, SearchRepository, UserRepository};
pub use scoring::SentimentScorer;
