//! Brand asset data model
//!
//! The brand record is the persisted personal-identity document injected
//! into every generated site. Field names serialize in camelCase to match
//! the on-disk `brand.json` layout.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::now_timestamp;

/// Schema version written into new brand records
pub const BRAND_VERSION: &str = "1.0.0";

/// Complete brand record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub version: String,
    pub created_at: String,
    pub updated_at: String,
    pub personal: PersonalInfo,
    pub visual: VisualBrand,
    pub defaults: BrandDefaults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_types: Option<Vec<ProjectTypeOverride>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<BTreeMap<String, serde_json::Value>>,
}

/// Personal identity section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub avatar: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    pub social: SocialLinks,
}

/// Social link collection with display hints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    pub links: Vec<SocialLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_more_button: Option<bool>,
}

/// Single social profile link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub label: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_in_new_tab: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Supported social platforms
///
/// Unknown platform names from older files deserialize as `Custom`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Github,
    Twitter,
    Linkedin,
    Youtube,
    Bilibili,
    Weibo,
    Zhihu,
    Juejin,
    Csdn,
    Email,
    Website,
    Blog,
    #[serde(other)]
    Custom,
}

impl SocialPlatform {
    /// All platforms in presentation order
    pub const ALL: [SocialPlatform; 13] = [
        SocialPlatform::Github,
        SocialPlatform::Twitter,
        SocialPlatform::Linkedin,
        SocialPlatform::Youtube,
        SocialPlatform::Bilibili,
        SocialPlatform::Weibo,
        SocialPlatform::Zhihu,
        SocialPlatform::Juejin,
        SocialPlatform::Csdn,
        SocialPlatform::Email,
        SocialPlatform::Website,
        SocialPlatform::Blog,
        SocialPlatform::Custom,
    ];

    /// Serialized platform name
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Github => "github",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::Bilibili => "bilibili",
            SocialPlatform::Weibo => "weibo",
            SocialPlatform::Zhihu => "zhihu",
            SocialPlatform::Juejin => "juejin",
            SocialPlatform::Csdn => "csdn",
            SocialPlatform::Email => "email",
            SocialPlatform::Website => "website",
            SocialPlatform::Blog => "blog",
            SocialPlatform::Custom => "custom",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual identity section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisualBrand {
    pub colors: BrandColors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<BrandTypography>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<BrandIcons>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BorderRadius>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_style: Option<ShadowStyle>,
}

/// Color palette; primary and accent are the required pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandColors {
    pub primary: String,
    pub accent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Font choices
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrandTypography {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
}

/// Logo and icon assets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrandIcons {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_dark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,
}

/// Corner rounding presets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BorderRadius {
    None,
    Small,
    Medium,
    Large,
}

/// Shadow depth presets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShadowStyle {
    None,
    Subtle,
    Normal,
    Strong,
}

/// Project-wide defaults stamped into generated sites
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrandDefaults {
    pub license: String,
    pub copyright_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_author: Option<String>,
}

/// Per-project-type overrides applied on top of the base brand
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTypeOverride {
    pub project_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_variables: Option<BTreeMap<String, serde_json::Value>>,
}

/// Options controlling [`super::store::BrandStore::save`]
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Validate the incoming record before anything is written
    pub validate: bool,
    /// Deep-merge onto the stored record instead of replacing it
    pub merge: bool,
    /// Refresh `updated_at` to the current instant
    pub update_timestamp: bool,
    /// Snapshot the existing file before overwriting it
    pub create_backup: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            validate: true,
            merge: false,
            update_timestamp: true,
            create_backup: true,
        }
    }
}

/// Outcome of brand validation
///
/// Errors and missing fields block a save; warnings are advisory.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub missing_fields: Vec<String>,
}

impl Brand {
    /// Default record seeded when the store file does not exist yet
    pub fn default_assets() -> Self {
        let now = now_timestamp();

        Brand {
            version: BRAND_VERSION.to_string(),
            created_at: now.clone(),
            updated_at: now,
            personal: PersonalInfo {
                name: String::new(),
                display_name: None,
                avatar: String::new(),
                bio: String::new(),
                description: None,
                email: String::new(),
                location: None,
                timezone: None,
                profession: None,
                company: None,
                skills: None,
                interests: None,
                social: SocialLinks::default(),
            },
            visual: VisualBrand {
                colors: BrandColors {
                    primary: "#3b82f6".to_string(),
                    accent: "#f59e0b".to_string(),
                    secondary: None,
                    background: None,
                    text: None,
                    border: None,
                    success: None,
                    warning: None,
                    error: None,
                },
                typography: None,
                icons: None,
                theme_name: None,
                support_dark_mode: None,
                border_radius: None,
                shadow_style: None,
            },
            defaults: BrandDefaults {
                license: "MIT".to_string(),
                copyright_text: format!(
                    "© {} {{{{brand.personal.name}}}}. All rights reserved.",
                    Utc::now().year()
                ),
                analytics_id: None,
                language: None,
                timezone: None,
                default_keywords: None,
                default_author: None,
            },
            project_types: None,
            custom: None,
        }
    }
}
