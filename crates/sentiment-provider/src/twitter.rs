//! Standard search API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use sentiment_core::{Post, PostSource, ProviderError, ProviderResult};

use crate::config::{FetchConfig, ProviderCredentials};
use crate::oauth::{encode, OAuthSigner};
use crate::wire::{decode_item, Item, SearchEnvelope};

const SEARCH_PATH: &str = "/1.1/search/tweets.json";
const RATE_LIMIT_RESET: &str = "x-rate-limit-reset";

/// One page request failed in a way the pagination loop must handle
enum PageError {
    Provider(ProviderError),
    /// Envelope could not be decoded
    Envelope(String),
}

impl From<ProviderError> for PageError {
    fn from(e: ProviderError) -> Self {
        Self::Provider(e)
    }
}

/// Post source backed by the provider's v1.1 search endpoint
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: Client,
    credentials: ProviderCredentials,
    config: FetchConfig,
}

impl TwitterClient {
    /// Build a client. The HTTP timeout is the per-page timeout.
    pub fn new(credentials: ProviderCredentials, config: FetchConfig) -> ProviderResult<Self> {
        let http = Client::builder()
            .timeout(config.page_timeout)
            .user_agent(concat!("sentiment-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Transient(format!("failed to build HTTP client: {e}")))?;

        let missing = credentials.missing();
        if !missing.is_empty() {
            warn!(?missing, "Provider credentials incomplete; searches will fail");
        }

        Ok(Self {
            http,
            credentials,
            config,
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    async fn paginate(&self, query: &str, limit: usize, deadline: Instant) -> ProviderResult<Vec<Post>> {
        let creds = self.credentials.require()?;
        let signer = OAuthSigner::from_credentials(&creds);

        let mut posts = Vec::with_capacity(limit.min(self.config.page_size * 4));
        let mut max_id: Option<i64> = None;
        let mut page = 0_u32;

        while posts.len() < limit {
            page += 1;
            let count = self.config.page_size.min(limit - posts.len()).max(1);

            let envelope = match self
                .fetch_page_with_retry(&signer, query, count, max_id, deadline)
                .await
            {
                Ok(envelope) => envelope,
                Err(PageError::Provider(e)) => return Err(e),
                Err(PageError::Envelope(reason)) if posts.is_empty() => {
                    return Err(ProviderError::Malformed(reason));
                }
                Err(PageError::Envelope(reason)) => {
                    warn!(page, %reason, "Malformed page, ending pagination early");
                    break;
                }
            };

            if envelope.statuses.is_empty() {
                debug!(page, "Empty page, no more results");
                break;
            }

            let next = envelope.next_max_id();
            let mut kept = 0_usize;
            for (index, raw) in envelope.statuses.into_iter().enumerate() {
                match decode_item(raw) {
                    Item::Post(post) => {
                        posts.push(post);
                        kept += 1;
                    }
                    Item::Blank => debug!(page, index, "Dropping post without text"),
                    Item::Malformed(reason) => {
                        warn!(page, index, %reason, "Skipping malformed post");
                    }
                }
            }
            debug!(page, kept, total = posts.len(), "Fetched page");

            match next {
                // A cursor that does not move backwards would loop forever
                Some(id) if max_id.is_none_or(|prev| id < prev) => max_id = Some(id),
                _ => break,
            }
        }

        posts.truncate(limit);
        Ok(posts)
    }

    async fn fetch_page_with_retry(
        &self,
        signer: &OAuthSigner<'_>,
        query: &str,
        count: usize,
        max_id: Option<i64>,
        deadline: Instant,
    ) -> Result<SearchEnvelope, PageError> {
        let mut attempt = 1;
        loop {
            let err = match self.fetch_page(signer, query, count, max_id).await {
                Ok(envelope) => return Ok(envelope),
                Err(PageError::Provider(e)) if e.is_retryable() => e,
                Err(other) => return Err(other),
            };

            if attempt >= self.config.max_attempts {
                warn!(attempt, error = %err, "Provider retries exhausted");
                return Err(err.into());
            }

            // A rate limit never retries sooner than the regular backoff
            let backoff = self.config.backoff(attempt);
            let delay = match &err {
                ProviderError::RateLimited {
                    retry_after_secs: Some(secs),
                } => Duration::from_secs(*secs).max(backoff),
                _ => backoff,
            };
            if Instant::now()
                .checked_add(delay)
                .is_none_or(|resume| resume > deadline)
            {
                warn!(?delay, error = %err, "Retry wait exceeds fetch budget");
                return Err(err.into());
            }

            warn!(attempt, ?delay, error = %err, "Provider request failed, retrying");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn fetch_page(
        &self,
        signer: &OAuthSigner<'_>,
        query: &str,
        count: usize,
        max_id: Option<i64>,
    ) -> Result<SearchEnvelope, PageError> {
        let url = format!("{}{SEARCH_PATH}", self.config.base_url.trim_end_matches('/'));
        let count = count.to_string();
        let max_id = max_id.map(|id| id.to_string());

        let mut params: Vec<(&str, &str)> = vec![
            ("q", query),
            ("count", count.as_str()),
            ("result_type", "recent"),
            ("tweet_mode", "extended"),
        ];
        if let Some(max_id) = max_id.as_deref() {
            params.push(("max_id", max_id));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{k}={}", encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let authorization = signer.authorization("GET", &url, &params);

        let response = self
            .http
            .get(format!("{url}?{query_string}"))
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Transient("page request timed out".to_string())
                } else {
                    ProviderError::Transient(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, response.headers()).into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transient(format!("reading body failed: {e}")))?;
        serde_json::from_slice(&body).map_err(|e| PageError::Envelope(e.to_string()))
    }
}

fn status_error(status: StatusCode, headers: &HeaderMap) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Auth(format!("provider returned {status}"))
        }
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
            retry_after_secs: retry_after(headers),
        },
        s if s.is_server_error() => ProviderError::Transient(format!("provider returned {s}")),
        s => ProviderError::Rejected { status: s.as_u16() },
    }
}

/// Seconds to wait from `retry-after`, else from the epoch in `x-rate-limit-reset`
fn retry_after(headers: &HeaderMap) -> Option<u64> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    if let Some(secs) = header(RETRY_AFTER.as_str()).and_then(|v| v.trim().parse().ok()) {
        return Some(secs);
    }
    let reset: i64 = header(RATE_LIMIT_RESET)?.trim().parse().ok()?;
    Some(u64::try_from(reset.saturating_sub(chrono::Utc::now().timestamp())).unwrap_or(0))
}

#[async_trait]
impl PostSource for TwitterClient {
    #[instrument(skip(self), fields(provider = "twitter"))]
    async fn fetch_posts(&self, query: &str, limit: usize) -> ProviderResult<Vec<Post>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        if query.trim().is_empty() {
            return Err(ProviderError::Rejected { status: 400 });
        }

        let budget = self.config.fetch_budget;
        let deadline = Instant::now() + budget;
        let posts = tokio::time::timeout(budget, self.paginate(query, limit, deadline))
            .await
            .map_err(|_| ProviderError::Transient(format!("fetch exceeded {budget:?} budget")))??;

        info!(count = posts.len(), "Fetched posts");
        Ok(posts)
    }
}
