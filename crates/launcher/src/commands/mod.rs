//! CLI command implementations

pub mod clean;
pub mod config;
pub mod create;
pub mod deploy;
pub mod list;
