//! # sentiment-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! - Connection pool management and schema setup
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use sentiment_db::{create_pool, run_migrations, PgSearchRepository, PoolConfig};
//!
//! let pool = create_pool(&PoolConfig::from(&app_config.database)).await?;
//! run_migrations(&pool).await?;
//! let searches = PgSearchRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, ping, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgSearchRepository, PgUserRepository};
