//! Service context - dependency container for services
//!
//! Holds the repositories, the post source, the scorer and the other
//! process-wide dependencies the services borrow.

use std::sync::Arc;

use sentiment_common::auth::JwtService;
use sentiment_common::SearchConfig;
use sentiment_core::traits::{PostSource, SearchRepository, SentimentScorer, UserRepository};
use sentiment_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Tuning for the search pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Posts requested from the provider per search
    pub fetch_limit: usize,
    /// Batches at least this large are scored on the blocking pool
    pub parallel_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_limit: 100,
            parallel_threshold: 32,
        }
    }
}

impl From<&SearchConfig> for PipelineConfig {
    fn from(config: &SearchConfig) -> Self {
        Self {
            fetch_limit: config.fetch_limit,
            parallel_threshold: config.parallel_threshold,
        }
    }
}

/// Service context containing all dependencies
///
/// Cloning is cheap; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    search_repo: Arc<dyn SearchRepository>,

    // Pipeline collaborators
    post_source: Arc<dyn PostSource>,
    scorer: Arc<dyn SentimentScorer>,
    pipeline: PipelineConfig,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        search_repo: Arc<dyn SearchRepository>,
        post_source: Arc<dyn PostSource>,
        scorer: Arc<dyn SentimentScorer>,
        pipeline: PipelineConfig,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            user_repo,
            search_repo,
            post_source,
            scorer,
            pipeline,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the search repository
    pub fn search_repo(&self) -> &dyn SearchRepository {
        self.search_repo.as_ref()
    }

    // === Pipeline ===

    /// Get the post source
    pub fn post_source(&self) -> &dyn PostSource {
        self.post_source.as_ref()
    }

    /// Shared handle to the scorer, for moving onto blocking threads
    pub fn scorer(&self) -> Arc<dyn SentimentScorer> {
        Arc::clone(&self.scorer)
    }

    pub fn pipeline(&self) -> PipelineConfig {
        self.pipeline
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("pipeline", &self.pipeline)
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    search_repo: Option<Arc<dyn SearchRepository>>,
    post_source: Option<Arc<dyn PostSource>>,
    scorer: Option<Arc<dyn SentimentScorer>>,
    pipeline: Option<PipelineConfig>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn search_repo(mut self, repo: Arc<dyn SearchRepository>) -> Self {
        self.search_repo = Some(repo);
        self
    }

    pub fn post_source(mut self, source: Arc<dyn PostSource>) -> Self {
        self.post_source = Some(source);
        self
    }

    pub fn scorer(mut self, scorer: Arc<dyn SentimentScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn pipeline(mut self, config: PipelineConfig) -> Self {
        self.pipeline = Some(config);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.search_repo
                .ok_or_else(|| ServiceError::validation("search_repo is required"))?,
            self.post_source
                .ok_or_else(|| ServiceError::validation("post_source is required"))?,
            self.scorer
                .ok_or_else(|| ServiceError::validation("scorer is required"))?,
            self.pipeline.unwrap_or_default(),
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
        ))
    }
}
