//! Search handlers
//!
//! Run a search, browse history, inspect and delete past searches.

use axum::{extract::State, Json};
use sentiment_service::dto::{
    CreateSearchRequest, PaginatedResponse, ResultResponse, SearchResponse,
    SearchSummaryResponse,
};
use sentiment_service::SearchService;
use tokio_util::sync::CancellationToken;

use crate::extractors::{AuthUser, Pagination, SearchIdPath, ValidatedJson};
use crate::response::{ApiResult, CreatedAt, NoContent};
use crate::state::AppState;

/// Run a new search
///
/// POST /searches
///
/// A client disconnect or request timeout drops this future, which leaves
/// nothing persisted.
pub async fn create_search(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateSearchRequest>,
) -> ApiResult<CreatedAt<Json<Vec<ResultResponse>>>> {
    let service = SearchService::new(state.service_context());
    let done = service
        .submit(auth.user_id, &request.query, &CancellationToken::new())
        .await?;

    Ok(CreatedAt {
        location: format!("/api/v1/searches/{}", done.search.id),
        body: Json(done.results.iter().map(ResultResponse::from).collect()),
    })
}

/// List the current user's searches, newest first
///
/// GET /searches?before=&limit=
pub async fn list_searches(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(params): Pagination,
) -> ApiResult<Json<PaginatedResponse<SearchSummaryResponse>>> {
    let service = SearchService::new(state.service_context());
    let response = service.list_history(auth.user_id, params).await?;
    Ok(Json(response))
}

/// Get one search with its ordered results
///
/// GET /searches/{search_id}
pub async fn get_search(
    State(state): State<AppState>,
    auth: AuthUser,
    SearchIdPath(search_id): SearchIdPath,
) -> ApiResult<Json<SearchResponse>> {
    let service = SearchService::new(state.service_context());
    let response = service.get_search(auth.user_id, search_id).await?;
    Ok(Json(response))
}

/// Delete a search and its results
///
/// DELETE /searches/{search_id}
pub async fn delete_search(
    State(state): State<AppState>,
    auth: AuthUser,
    SearchIdPath(search_id): SearchIdPath,
) -> ApiResult<NoContent> {
    let service = SearchService::new(state.service_context());
    service.delete_search(auth.user_id, search_id).await?;
    Ok(NoContent)
}
