//! CLI command implementations.

pub mod list;
pub mod projects;
pub mod record;
pub mod summary;
pub mod switch;
