//! Pagination extractor
//!
//! Extracts cursor-based history paging from the query string.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use sentiment_core::Snowflake;
use sentiment_service::dto::HistoryParams;
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    /// Get searches older than this ID
    #[serde(default)]
    pub before: Option<String>,
    /// Maximum number of searches to return
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination(pub HistoryParams);

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let before = params
            .before
            .map(|s| {
                s.parse::<Snowflake>()
                    .map_err(|_| ApiError::invalid_request("Invalid 'before' cursor format"))
            })
            .transpose()?;

        Ok(Pagination(HistoryParams {
            before,
            limit: params.limit,
        }))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_request(e.body_text()))?;

        Pagination::try_from(params)
    }
}
