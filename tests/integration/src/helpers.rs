//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, pointing them at a mock
//! post provider, and making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use sentiment_api::{create_app, create_app_state};
use sentiment_common::AppConfig;
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wiremock::MockServer;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with no provider credentials
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config(None)?).await
    }

    /// Start a server whose provider client talks to `provider`
    pub async fn with_provider(provider: &MockServer) -> Result<Self> {
        Self::start_with_config(test_config(Some(provider))?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.delete(&url).bearer_auth(token).send().await?)
    }
}

/// Build a test configuration from the environment.
///
/// Only `DATABASE_URL` has to be set. Provider settings always come from
/// `provider`; without one the server runs with no credentials and an
/// unroutable provider address.
pub fn test_config(provider: Option<&MockServer>) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut vars: HashMap<String, String> = std::env::vars().collect();
    for (key, value) in [
        ("API_PORT", "0"),
        ("JWT_SECRET", "integration-test-secret"),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
    ] {
        vars.entry(key.to_string()).or_insert_with(|| value.to_string());
    }

    for key in [
        "TWITTER_API_KEY",
        "TWITTER_API_SECRET",
        "TWITTER_ACCESS_TOKEN",
        "TWITTER_ACCESS_TOKEN_SECRET",
    ] {
        vars.remove(key);
    }
    vars.insert("PROVIDER_MAX_ATTEMPTS".into(), "1".into());
    vars.insert("PROVIDER_PAGE_TIMEOUT_SECS".into(), "2".into());

    match provider {
        Some(server) => {
            vars.insert("TWITTER_API_BASE_URL".into(), server.uri());
            vars.insert("TWITTER_API_KEY".into(), "key".into());
            vars.insert("TWITTER_API_SECRET".into(), "secret".into());
            vars.insert("TWITTER_ACCESS_TOKEN".into(), "token".into());
            vars.insert("TWITTER_ACCESS_TOKEN_SECRET".into(), "token-secret".into());
        }
        None => {
            vars.insert("TWITTER_API_BASE_URL".into(), "http://127.0.0.1:9".into());
        }
    }

    AppConfig::from_map(&vars).map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its error code
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: crate::fixtures::ErrorResponse = assert_json(response, expected_status).await?;
    Ok(body.error.code)
}
