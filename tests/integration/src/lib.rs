//! Integration test utilities for the sentiment search server
//!
//! Spawns the REST API against a real database and a mock post provider.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
