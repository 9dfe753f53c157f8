//! Database models - SQLx-compatible structs for PostgreSQL tables

mod search;
mod user;

pub use search::{SearchModel, SearchResultModel, SearchSummaryModel};
pub use user::UserModel;
