//! # sentiment-provider
//!
//! Client for the provider's standard search API. Fetches a bounded batch
//! of recent posts for a query, following pagination cursors and retrying
//! rate-limited or transient failures within a total time budget.

mod config;
mod oauth;
mod twitter;
mod wire;

pub use config::{FetchConfig, ProviderCredentials};
pub use oauth::OAuthSigner;
pub use twitter::TwitterClient;
