//! # sentiment-service
//!
//! Application layer containing the search pipeline, auth and history
//! use cases, and the DTOs the API serializes.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CompletedSearch, PipelineConfig, SearchService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
