//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    ProviderConfig, RateLimitConfig, SearchConfig, ServerConfig, SnowflakeConfig,
};
