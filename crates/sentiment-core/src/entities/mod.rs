//! Domain entities - core business objects

mod post;
mod search;
mod search_result;
mod user;

pub use post::Post;
pub use search::{Search, SearchSummary};
pub use search_result::SearchResult;
pub use user::User;
