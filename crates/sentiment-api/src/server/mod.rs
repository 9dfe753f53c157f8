//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sentiment_common::{AppConfig, AppError, JwtService, ProviderConfig, SearchConfig};
use sentiment_core::SnowflakeGenerator;
use sentiment_db::{create_pool, run_migrations, PgSearchRepository, PgUserRepository, PoolConfig};
use sentiment_provider::{FetchConfig, ProviderCredentials, TwitterClient};
use sentiment_scorer::LexiconScorer;
use sentiment_service::{PipelineConfig, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns `AppError::Config` when the rate limit configuration is unusable
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let router = apply_middleware(
        api.merge(health_routes()),
        &config.cors,
        config.app.env.is_production(),
    );
    Ok(router.with_state(state))
}

/// Provider client settings from application configuration
pub fn fetch_config(provider: &ProviderConfig, search: &SearchConfig) -> FetchConfig {
    FetchConfig {
        base_url: provider.base_url.clone(),
        page_size: search.page_size,
        page_timeout: Duration::from_secs(provider.page_timeout_secs),
        fetch_budget: Duration::from_secs(provider.fetch_budget_secs),
        max_attempts: provider.max_attempts,
        ..FetchConfig::default()
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if !config.provider.has_credentials() {
        warn!("Provider credentials incomplete; searches will fail until they are set");
    }
    let credentials = ProviderCredentials {
        api_key: config.provider.api_key.clone(),
        api_secret: config.provider.api_secret.clone(),
        access_token: config.provider.access_token.clone(),
        access_token_secret: config.provider.access_token_secret.clone(),
    };
    let client = TwitterClient::new(credentials, fetch_config(&config.provider, &config.search))
        .map_err(|e| AppError::Config(e.to_string()))?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .search_repo(Arc::new(PgSearchRepository::new(pool.clone())))
        .post_source(Arc::new(client))
        .scorer(Arc::new(LexiconScorer::new()))
        .pipeline(PipelineConfig::from(&config.search))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, pool, config))
}

/// Run the HTTP server until it fails or the process receives ctrl-c
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state)?;
    run_server(app, &addr).await
}
