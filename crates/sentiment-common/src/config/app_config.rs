//! Application configuration structs
//!
//! Loads configuration from environment variables (and `.env` if present).

use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub provider: ProviderConfig,
    pub search: SearchConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment {other:?}")),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Social-media provider access.
///
/// Credentials are optional at startup; a search fails with an auth error
/// when any of them is missing.
#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,
    #[serde(default = "default_fetch_budget_secs")]
    pub fetch_budget_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("credentials_complete", &self.has_credentials())
            .field("base_url", &self.base_url)
            .field("page_timeout_secs", &self.page_timeout_secs)
            .field("fetch_budget_secs", &self.fetch_budget_secs)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

impl ProviderConfig {
    /// Whether all four credentials are present
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        [
            &self.api_key,
            &self.api_secret,
            &self.access_token,
            &self.access_token_secret,
        ]
        .iter()
        .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// Search pipeline tuning
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Posts fetched per search
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    /// Posts requested per provider page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Batches at least this large are scored on the blocking pool
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

// Default value functions
fn default_app_name() -> String {
    "sentiment-search".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_access_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_provider_base_url() -> String {
    "https://api.twitter.com".to_string()
}

fn default_page_timeout_secs() -> u64 {
    5
}

fn default_fetch_budget_secs() -> u64 {
    20
}

fn default_max_attempts() -> u32 {
    3
}

fn default_fetch_limit() -> usize {
    100
}

fn default_page_size() -> usize {
    100
}

fn default_parallel_threshold() -> usize {
    32
}

/// Reads typed values from a key lookup
struct Vars<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parse_or<T: FromStr>(&self, key: &'static str, default: fn() -> T) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
            None => Ok(default()),
        }
    }

    fn parse_required<T: FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        let raw = self.required(key)?;
        raw.trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw))
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or
    /// a value cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an explicit key/value map
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars { lookup };

        let config = Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: vars.parse_or("APP_ENV", Environment::default)?,
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port: vars.parse_required("API_PORT")?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars.parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars.parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            jwt: JwtConfig {
                secret: vars.required("JWT_SECRET")?,
                access_token_expiry: vars
                    .parse_or("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parse_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: vars.parse_or("WORKER_ID", || 0)?,
            },
            provider: ProviderConfig {
                api_key: vars.get("TWITTER_API_KEY"),
                api_secret: vars.get("TWITTER_API_SECRET"),
                access_token: vars.get("TWITTER_ACCESS_TOKEN"),
                access_token_secret: vars.get("TWITTER_ACCESS_TOKEN_SECRET"),
                base_url: vars
                    .get("TWITTER_API_BASE_URL")
                    .unwrap_or_else(default_provider_base_url),
                page_timeout_secs: vars
                    .parse_or("PROVIDER_PAGE_TIMEOUT_SECS", default_page_timeout_secs)?,
                fetch_budget_secs: vars
                    .parse_or("PROVIDER_FETCH_BUDGET_SECS", default_fetch_budget_secs)?,
                max_attempts: vars.parse_or("PROVIDER_MAX_ATTEMPTS", default_max_attempts)?,
            },
            search: SearchConfig {
                fetch_limit: vars.parse_or("SEARCH_FETCH_LIMIT", default_fetch_limit)?,
                page_size: vars.parse_or("SEARCH_PAGE_SIZE", default_page_size)?,
                parallel_threshold: vars
                    .parse_or("SCORING_PARALLEL_THRESHOLD", default_parallel_threshold)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.snowflake.worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "WORKER_ID",
                self.snowflake.worker_id.to_string(),
            ));
        }
        if self.search.fetch_limit == 0 {
            return Err(ConfigError::InvalidValue("SEARCH_FETCH_LIMIT", "0".into()));
        }
        if !(1..=100).contains(&self.search.page_size) {
            return Err(ConfigError::InvalidValue(
                "SEARCH_PAGE_SIZE",
                self.search.page_size.to_string(),
            ));
        }
        if self.provider.max_attempts == 0 {
            return Err(ConfigError::InvalidValue("PROVIDER_MAX_ATTEMPTS", "0".into()));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
