//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in sentiment-core.

mod error;
mod search;
mod user;

pub use search::PgSearchRepository;
pub use user::PgUserRepository;
