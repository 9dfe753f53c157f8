//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use sentiment_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

/// `:search_id` path segment
#[derive(Debug, Clone, Copy)]
pub struct SearchIdPath(pub Snowflake);

#[derive(Debug, Deserialize)]
struct RawSearchId {
    search_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for SearchIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawSearchId>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        raw.search_id
            .parse()
            .map(SearchIdPath)
            .map_err(|_| ApiError::invalid_path("Invalid search_id format"))
    }
}
