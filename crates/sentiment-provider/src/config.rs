//! Client configuration

use std::fmt;
use std::time::Duration;

use sentiment_core::ProviderError;

/// Four opaque OAuth 1.0a credentials. Any of them may be absent at
/// startup; a fetch fails with [`ProviderError::Auth`] before sending
/// anything if one is missing.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
}

/// Credentials known to be complete
#[derive(Clone)]
pub(crate) struct CompleteCredentials<'a> {
    pub api_key: &'a str,
    pub api_secret: &'a str,
    pub access_token: &'a str,
    pub access_token_secret: &'a str,
}

impl ProviderCredentials {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            access_token: Some(access_token.into()),
            access_token_secret: Some(access_token_secret.into()),
        }
    }

    /// Names of credentials that are missing or blank
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("api_key", &self.api_key),
            ("api_secret", &self.api_secret),
            ("access_token", &self.access_token),
            ("access_token_secret", &self.access_token_secret),
        ]
        .into_iter()
        .filter(|(_, v)| !v.as_deref().is_some_and(|s| !s.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }

    pub(crate) fn require(&self) -> Result<CompleteCredentials<'_>, ProviderError> {
        match (
            self.api_key.as_deref().filter(|s| !s.trim().is_empty()),
            self.api_secret.as_deref().filter(|s| !s.trim().is_empty()),
            self.access_token.as_deref().filter(|s| !s.trim().is_empty()),
            self.access_token_secret
                .as_deref()
                .filter(|s| !s.trim().is_empty()),
        ) {
            (Some(api_key), Some(api_secret), Some(access_token), Some(access_token_secret)) => {
                Ok(CompleteCredentials {
                    api_key,
                    api_secret,
                    access_token,
                    access_token_secret,
                })
            }
            _ => Err(ProviderError::Auth(format!(
                "missing credentials: {}",
                self.missing().join(", ")
            ))),
        }
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("ProviderCredentials")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("access_token", &redact(&self.access_token))
            .field("access_token_secret", &redact(&self.access_token_secret))
            .finish()
    }
}

/// Pagination, timeout and retry settings
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Scheme and host of the provider API, without trailing slash
    pub base_url: String,
    /// Posts requested per page (provider maximum is 100)
    pub page_size: usize,
    /// Timeout for a single page request
    pub page_timeout: Duration,
    /// Wall-clock budget for a whole fetch, including retries
    pub fetch_budget: Duration,
    /// Attempts per page, including the first
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
}

impl FetchConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.twitter.com";
    pub const MAX_PAGE_SIZE: usize = 100;

    /// Delay before retry number `attempt` (1-based): base doubled each
    /// time, capped at `backoff_max`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.backoff_base
            .checked_mul(factor)
            .map_or(self.backoff_max, |d| d.min(self.backoff_max))
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            page_size: Self::MAX_PAGE_SIZE,
            page_timeout: Duration::from_secs(5),
            fetch_budget: Duration::from_secs(20),
            max_attempts: 3,
            backoff_base: Duration::from_millis(500),
            backoff_max: Duration::from_secs(8),
        }
    }
}
