//! # launcher-core
//!
//! Core library for the Astro Launcher CLI providing:
//! - Schema-validated YAML config loading with inheritance
//! - Brand asset persistence with validation and rotating backups
//! - The project registry with filtering and statistics
//! - Template context assembly for site generation

pub mod brand;
pub mod config;
pub mod error;
pub mod merge;
pub mod project;
pub mod schema;
pub mod template;
pub mod utils;

pub use brand::{Brand, BrandStore, SaveOptions};
pub use config::{ConfigManager, PlatformConfig};
pub use error::{Error, Result};
pub use merge::deep_merge;
pub use project::{ProjectStore, ProjectType};
pub use schema::SchemaValidator;
pub use template::{TemplateContext, TemplateContextBuilder};
pub use utils::{default_data_dir, get_home_dir};
