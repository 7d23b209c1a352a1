//! CLI command implementations

pub mod analyze;
pub mod simulate;
pub mod summary;
