//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of one
//! request and orchestrates repository, provider and scorer calls.

pub mod auth;
pub mod context;
pub mod error;
pub mod scoring;
pub mod search;
pub mod user;

pub use auth::AuthService;
pub use context::{PipelineConfig, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use search::{CompletedSearch, SearchService};
pub use user::UserService;
