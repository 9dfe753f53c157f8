//! Post source port

use async_trait::async_trait;

use crate::entities::Post;
use crate::error::ProviderError;

/// Result type for post source operations
pub type ProviderResult<T> = Result<T, ProviderError>;

#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch up to `limit` recent posts matching `query`, in provider order.
    ///
    /// Never returns more than `limit` posts. Posts without text are
    /// already discarded.
    async fn fetch_posts(&self, query: &str, limit: usize) -> ProviderResult<Vec<Post>>;
}
