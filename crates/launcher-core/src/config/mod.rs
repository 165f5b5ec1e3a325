//! Configuration loading and types

mod loader;
mod types;

pub use loader::{load_config, load_config_with_inheritance, load_yaml_value, ConfigManager};
pub use types::{
    PlatformBrand, PlatformConfig, PlatformPersonal, ProjectConfig, ProjectMeta, ProjectTheme,
};
