//! Value objects - immutable types that represent domain concepts

mod query;
mod sentiment;
mod snowflake;

pub use query::{Query, QueryError};
pub use sentiment::Sentiment;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
