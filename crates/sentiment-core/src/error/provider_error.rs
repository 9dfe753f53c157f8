//! Errors raised by a post source

use thiserror::Error;

/// Failure fetching posts from the external provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Missing credential or HTTP 401/403. Never retried.
    #[error("provider rejected credentials: {0}")]
    Auth(String),

    /// HTTP 429 after retries were exhausted or the wait exceeded the budget
    #[error("provider rate limit exceeded")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Network failure, timeout or 5xx after retries were exhausted
    #[error("provider unavailable: {0}")]
    Transient(String),

    /// Response body could not be decoded
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// Any other 4xx, usually a query the provider refuses
    #[error("provider rejected request with status {status}")]
    Rejected { status: u16 },
}

impl ProviderError {
    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Transient(_))
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(_) => "PROVIDER_AUTH_ERROR",
            Self::RateLimited { .. } => "PROVIDER_RATE_LIMITED",
            Self::Transient(_) => "PROVIDER_UNAVAILABLE",
            Self::Malformed(_) => "PROVIDER_MALFORMED_RESPONSE",
            Self::Rejected { .. } => "PROVIDER_REJECTED",
        }
    }
}
