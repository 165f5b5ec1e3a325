//! Configuration file types
//!
//! Two documents share the loading pipeline: the platform config stored in
//! the launcher data directory and the per-project config written into
//! generated sites.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Platform-wide configuration (`config.yaml` in the data directory)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformConfig {
    pub brand: PlatformBrand,
}

/// Brand section of the platform config
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformBrand {
    pub personal: PlatformPersonal,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub socials: BTreeMap<String, String>,
}

/// Personal details inside the platform config
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformPersonal {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl PlatformConfig {
    /// Seed document written the first time the config store is touched
    pub fn seed() -> Self {
        PlatformConfig {
            brand: PlatformBrand {
                personal: PlatformPersonal {
                    name: "Default User".to_string(),
                    avatar: None,
                    bio: None,
                    email: None,
                },
                socials: BTreeMap::new(),
            },
        }
    }
}

/// Per-project configuration (`astro-launcher.yaml` inside a generated site)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    pub meta: ProjectMeta,
    #[serde(default)]
    pub theme: ProjectTheme,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, bool>,
}

/// Identity block of a project config
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectMeta {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

/// Theme block of a project config
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectTheme {
    #[serde(default = "default_theme_name")]
    pub name: String,
    #[serde(rename = "primaryColor", skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
}

impl Default for ProjectTheme {
    fn default() -> Self {
        ProjectTheme {
            name: default_theme_name(),
            primary_color: None,
        }
    }
}

fn default_theme_name() -> String {
    "default".to_string()
}
