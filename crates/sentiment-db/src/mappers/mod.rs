//! Model <-> entity mappers
//!
//! - `From<Model>`/`TryFrom<Model>` for entities: database rows to domain objects
//! - [`ResultColumns`]: results split into column arrays for bulk insertion

mod search;
mod user;

pub use search::ResultColumns;
