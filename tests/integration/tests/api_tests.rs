//! REST API integration tests
//!
//! Require a running PostgreSQL instance (`DATABASE_URL`); each test is
//! skipped when it is not configured. The post provider is a local mock.

use integration_tests::*;
use reqwest::{header::LOCATION, StatusCode};
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn register(server: &TestServer) -> anyhow::Result<AuthResponse> {
    let response = server
        .post("/api/v1/auth/register", &RegisterRequest::unique())
        .await?;
    assert_json(response, StatusCode::CREATED).await
}

async fn mount_search(provider: &MockServer, query: &str, statuses: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(last_page(statuses)))
        .mount(provider)
        .await;
}

async fn history(server: &TestServer, token: &str) -> anyhow::Result<HistoryPage> {
    let response = server.get_auth("/api/v1/searches", token).await?;
    assert_json(response, StatusCode::OK).await
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let server = TestServer::start().await?;

    let health: Value = assert_json(server.get("/health").await?, StatusCode::OK).await?;
    assert_eq!(health["status"], "healthy");

    let ready: Value = assert_json(server.get("/health/ready").await?, StatusCode::OK).await?;
    assert_eq!(ready["checks"]["database"], "healthy");
    Ok(())
}

#[tokio::test]
async fn test_responses_carry_request_id() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let server = TestServer::start().await?;

    let response = server.get("/health").await?;
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_register_and_login() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let server = TestServer::start().await?;
    let request = RegisterRequest::unique();

    let registered: AuthResponse = assert_json(
        server.post("/api/v1/auth/register", &request).await?,
        StatusCode::CREATED,
    )
    .await?;
    assert_eq!(registered.user.username, request.username);
    assert_eq!(registered.token_type, "Bearer");
    assert!(registered.expires_in > 0);

    let logged_in: AuthResponse = assert_json(
        server
            .post("/api/v1/auth/login", &LoginRequest::from_register(&request))
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(logged_in.user.id, registered.user.id);
    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_username() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let server = TestServer::start().await?;
    let request = RegisterRequest::unique();

    assert_status(
        server.post("/api/v1/auth/register", &request).await?,
        StatusCode::CREATED,
    )
    .await?;
    let code = assert_error(
        server.post("/api/v1/auth/register", &request).await?,
        StatusCode::CONFLICT,
    )
    .await?;
    assert_eq!(code, "USERNAME_ALREADY_EXISTS");
    Ok(())
}

#[tokio::test]
async fn test_register_rejects_weak_password() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let server = TestServer::start().await?;
    let request = RegisterRequest {
        password: "short".into(),
        ..RegisterRequest::unique()
    };

    let code = assert_error(
        server.post("/api/v1/auth/register", &request).await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    assert_eq!(code, "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let server = TestServer::start().await?;
    let request = RegisterRequest::unique();
    assert_status(
        server.post("/api/v1/auth/register", &request).await?,
        StatusCode::CREATED,
    )
    .await?;

    let login = LoginRequest {
        username: request.username,
        password: "WrongPass123".into(),
    };
    let code = assert_error(
        server.post("/api/v1/auth/login", &login).await?,
        StatusCode::UNAUTHORIZED,
    )
    .await?;
    assert_eq!(code, "INVALID_CREDENTIALS");
    Ok(())
}

#[tokio::test]
async fn test_current_user_requires_token() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let server = TestServer::start().await?;
    let auth = register(&server).await?;

    let me: UserResponse = assert_json(
        server.get_auth("/api/v1/users/@me", &auth.access_token).await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(me.id, auth.user.id);

    assert_status(
        server.get("/api/v1/users/@me").await?,
        StatusCode::UNAUTHORIZED,
    )
    .await?;
    assert_status(
        server.get_auth("/api/v1/users/@me", "not-a-token").await?,
        StatusCode::UNAUTHORIZED,
    )
    .await?;
    Ok(())
}

// ============================================================================
// Searches
// ============================================================================

#[tokio::test]
async fn test_search_round_trip() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let provider = MockServer::start().await;
    mount_search(
        &provider,
        "rustlang",
        vec![
            status(30, "What a great tool"),
            status(29, "   "),
            status(28, "terrible bug again"),
        ],
    )
    .await;
    let server = TestServer::with_provider(&provider).await?;
    let auth = register(&server).await?;

    let response = server
        .post_auth(
            "/api/v1/searches",
            &auth.access_token,
            &CreateSearchRequest::new("rustlang"),
        )
        .await?;
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("missing Location header"))?;
    let results: Vec<ResultResponse> = assert_json(response, StatusCode::CREATED).await?;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].text, "What a great tool");
    assert_eq!(results[0].user, "user30");
    assert_eq!(results[0].retweet_count, 3);
    assert_eq!(results[0].favorite_count, 5);
    assert!(results[0].sentiment > 0.0);
    assert_eq!(results[1].text, "terrible bug again");
    assert!(results[1].sentiment < 0.0);
    assert!(results.iter().all(|r| (-1.0..=1.0).contains(&r.sentiment)));

    let stored: SearchResponse = assert_json(
        server.get_auth(&location, &auth.access_token).await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(stored.query, "rustlang");
    assert_eq!(stored.results.len(), 2);
    assert_eq!(stored.results[0].text, results[0].text);
    assert_eq!(stored.results[0].created_at, results[0].created_at);
    assert!(location.ends_with(&stored.id));

    let page = history(&server, &auth.access_token).await?;
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, stored.id);
    assert_eq!(page.data[0].result_count, 2);
    assert!(page.data[0].average_sentiment.is_some());
    assert!(!page.pagination.has_more);

    assert_status(
        server.delete_auth(&location, &auth.access_token).await?,
        StatusCode::NO_CONTENT,
    )
    .await?;
    let code = assert_error(
        server.get_auth(&location, &auth.access_token).await?,
        StatusCode::NOT_FOUND,
    )
    .await?;
    assert_eq!(code, "UNKNOWN_SEARCH");
    assert!(history(&server, &auth.access_token).await?.data.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_search_with_no_matches() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let provider = MockServer::start().await;
    mount_search(&provider, "nothing-here", Vec::new()).await;
    let server = TestServer::with_provider(&provider).await?;
    let auth = register(&server).await?;

    let results: Vec<ResultResponse> = assert_json(
        server
            .post_auth(
                "/api/v1/searches",
                &auth.access_token,
                &CreateSearchRequest::new("nothing-here"),
            )
            .await?,
        StatusCode::CREATED,
    )
    .await?;
    assert!(results.is_empty());

    let page = history(&server, &auth.access_token).await?;
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].result_count, 0);
    assert_eq!(page.data[0].average_sentiment, None);
    Ok(())
}

#[tokio::test]
async fn test_search_without_provider_credentials() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let server = TestServer::start().await?;
    let auth = register(&server).await?;

    let code = assert_error(
        server
            .post_auth(
                "/api/v1/searches",
                &auth.access_token,
                &CreateSearchRequest::new("rust"),
            )
            .await?,
        StatusCode::BAD_GATEWAY,
    )
    .await?;
    assert_eq!(code, "PROVIDER_AUTH_ERROR");
    assert!(history(&server, &auth.access_token).await?.data.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_provider_rate_limit_surfaces_as_unavailable() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&provider)
        .await;
    let server = TestServer::with_provider(&provider).await?;
    let auth = register(&server).await?;

    let code = assert_error(
        server
            .post_auth(
                "/api/v1/searches",
                &auth.access_token,
                &CreateSearchRequest::new("rust"),
            )
            .await?,
        StatusCode::SERVICE_UNAVAILABLE,
    )
    .await?;
    assert_eq!(code, "PROVIDER_RATE_LIMITED");
    assert!(history(&server, &auth.access_token).await?.data.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_blank_query_rejected() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let provider = MockServer::start().await;
    let server = TestServer::with_provider(&provider).await?;
    let auth = register(&server).await?;

    let code = assert_error(
        server
            .post_auth(
                "/api/v1/searches",
                &auth.access_token,
                &CreateSearchRequest::new("   "),
            )
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    assert_eq!(code, "INVALID_QUERY");
    assert!(provider.received_requests().await.unwrap_or_default().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_search_requires_token() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let server = TestServer::start().await?;

    assert_status(
        server
            .post("/api/v1/searches", &CreateSearchRequest::new("rust"))
            .await?,
        StatusCode::UNAUTHORIZED,
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn test_history_pages_newest_first() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let provider = MockServer::start().await;
    for query in ["first", "second", "third"] {
        mount_search(&provider, query, vec![status(1, "fine")]).await;
    }
    let server = TestServer::with_provider(&provider).await?;
    let auth = register(&server).await?;

    for query in ["first", "second", "third"] {
        assert_status(
            server
                .post_auth(
                    "/api/v1/searches",
                    &auth.access_token,
                    &CreateSearchRequest::new(query),
                )
                .await?,
            StatusCode::CREATED,
        )
        .await?;
    }

    let first: HistoryPage = assert_json(
        server
            .get_auth("/api/v1/searches?limit=2", &auth.access_token)
            .await?,
        StatusCode::OK,
    )
    .await?;
    let queries: Vec<&str> = first.data.iter().map(|s| s.query.as_str()).collect();
    assert_eq!(queries, vec!["third", "second"]);
    assert!(first.pagination.has_more);
    assert_eq!(first.pagination.limit, 2);

    let cursor = first
        .pagination
        .before
        .ok_or_else(|| anyhow::anyhow!("missing cursor"))?;
    let second: HistoryPage = assert_json(
        server
            .get_auth(
                &format!("/api/v1/searches?limit=2&before={cursor}"),
                &auth.access_token,
            )
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(second.data.len(), 1);
    assert_eq!(second.data[0].query, "first");
    assert!(!second.pagination.has_more);
    Ok(())
}

#[tokio::test]
async fn test_search_hidden_from_other_users() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let provider = MockServer::start().await;
    mount_search(&provider, "private", vec![status(1, "mine")]).await;
    let server = TestServer::with_provider(&provider).await?;
    let owner = register(&server).await?;
    let other = register(&server).await?;

    let response = server
        .post_auth(
            "/api/v1/searches",
            &owner.access_token,
            &CreateSearchRequest::new("private"),
        )
        .await?;
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("missing Location header"))?;
    assert_status(response, StatusCode::CREATED).await?;

    assert_status(
        server.get_auth(&location, &other.access_token).await?,
        StatusCode::NOT_FOUND,
    )
    .await?;
    assert_status(
        server.delete_auth(&location, &other.access_token).await?,
        StatusCode::NOT_FOUND,
    )
    .await?;
    assert!(history(&server, &other.access_token).await?.data.is_empty());

    assert_status(
        server.get_auth(&location, &owner.access_token).await?,
        StatusCode::OK,
    )
    .await?;
    Ok(())
}

#[tokio::test]
async fn test_invalid_search_id_path() -> anyhow::Result<()> {
    if !check_test_env() {
        return Ok(());
    }
    let server = TestServer::start().await?;
    let auth = register(&server).await?;

    let code = assert_error(
        server
            .get_auth("/api/v1/searches/not-a-number", &auth.access_token)
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let code = assert_error(
        server
            .get_auth("/api/v1/searches/12345", &auth.access_token)
            .await?,
        StatusCode::NOT_FOUND,
    )
    .await?;
    assert_eq!(code, "UNKNOWN_SEARCH");
    Ok(())
}
