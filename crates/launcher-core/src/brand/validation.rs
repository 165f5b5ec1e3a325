//! Brand record validation
//!
//! Validation distinguishes three severities. Errors and missing required
//! fields make the record unsaveable; warnings surface in the CLI but
//! never block a write.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

use super::types::{Brand, ValidationReport};

/// Licenses that pass without a warning
const COMMON_LICENSES: &[&str] = &[
    "MIT",
    "Apache-2.0",
    "GPL-3.0",
    "BSD-3-Clause",
    "ISC",
    "Unlicense",
];

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(#[0-9a-f]{3,8}|rgb\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*\)|rgba\(\s*\d+\s*,\s*\d+\s*,\s*\d+\s*,\s*[\d.]+\s*\)|hsl\(\s*\d+\s*,\s*\d+%\s*,\s*\d+%\s*\)|hsla\(\s*\d+\s*,\s*\d+%\s*,\s*\d+%\s*,\s*[\d.]+\s*\))$",
    )
    .expect("color pattern compiles")
});

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static LANGUAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[A-Z]{2})?$").expect("language pattern compiles"));

static TIMEZONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(UTC|[A-Za-z]+(/[A-Za-z0-9_+-]+)+)$").expect("timezone pattern compiles")
});

/// Accepts hex, rgb(), rgba(), hsl() and hsla() color notations
pub fn is_valid_color(value: &str) -> bool {
    COLOR_RE.is_match(value)
}

/// Loose email shape check (one @, a dot in the domain, no whitespace)
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Absolute URL check
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

fn is_valid_timestamp(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
}

/// Validate a brand record, collecting every finding in one pass
pub fn validate_brand(brand: &Brand) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut missing_fields = Vec::new();

    // Structural requirements
    if brand.version.is_empty() {
        missing_fields.push("version".to_string());
    }
    if brand.visual.colors.primary.is_empty() {
        missing_fields.push("visual.colors.primary".to_string());
    }
    if brand.visual.colors.accent.is_empty() {
        missing_fields.push("visual.colors.accent".to_string());
    }

    // Timestamps
    if !brand.created_at.is_empty() && !is_valid_timestamp(&brand.created_at) {
        errors.push("Invalid createdAt timestamp format".to_string());
    }
    if !brand.updated_at.is_empty() && !is_valid_timestamp(&brand.updated_at) {
        errors.push("Invalid updatedAt timestamp format".to_string());
    }

    // Personal details
    let personal = &brand.personal;
    if !personal.email.trim().is_empty() && !is_valid_email(&personal.email) {
        errors.push("Invalid email format".to_string());
    }
    if !personal.avatar.trim().is_empty() && !is_valid_url(&personal.avatar) {
        warnings.push("Avatar URL format may not be optimal".to_string());
    }
    if personal.name.chars().count() > 100 {
        warnings.push("Name is quite long (over 100 characters)".to_string());
    }
    if personal.bio.chars().count() > 500 {
        warnings.push("Bio is quite long (over 500 characters)".to_string());
    }

    // Social links; positions are 1-based in messages
    for (index, link) in personal.social.links.iter().enumerate() {
        let position = index + 1;
        if link.url.is_empty() || !is_valid_url(&link.url) {
            errors.push(format!("Social link {}: Invalid URL format", position));
        }
        if link.label.trim().is_empty() {
            errors.push(format!("Social link {}: Label is required", position));
        }
    }

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for link in &personal.social.links {
        if !seen.insert(link.platform) && !duplicates.contains(&link.platform.as_str()) {
            duplicates.push(link.platform.as_str());
        }
    }
    if !duplicates.is_empty() {
        warnings.push(format!(
            "Duplicate social platforms detected: {}",
            duplicates.join(", ")
        ));
    }

    // Colors
    let colors = &brand.visual.colors;
    if !colors.primary.is_empty() && !is_valid_color(&colors.primary) {
        errors.push("Invalid primary color format".to_string());
    }
    if !colors.accent.is_empty() && !is_valid_color(&colors.accent) {
        errors.push("Invalid accent color format".to_string());
    }
    if let Some(secondary) = &colors.secondary {
        if !is_valid_color(secondary) {
            errors.push("Invalid secondary color format".to_string());
        }
    }
    if !colors.primary.is_empty() && colors.primary == colors.accent {
        warnings.push(
            "Primary and accent colors are identical - consider using different colors for better contrast"
                .to_string(),
        );
    }

    // Defaults
    let defaults = &brand.defaults;
    if !defaults.license.is_empty() && !COMMON_LICENSES.contains(&defaults.license.as_str()) {
        warnings.push(format!(
            "Uncommon license: {}. Consider using a standard license.",
            defaults.license
        ));
    }
    if let Some(language) = &defaults.language {
        if !LANGUAGE_RE.is_match(language) {
            warnings.push("Language code format should be like \"en\" or \"zh-CN\"".to_string());
        }
    }
    if let Some(timezone) = &defaults.timezone {
        if !TIMEZONE_RE.is_match(timezone) {
            warnings.push(format!("Invalid timezone: {}", timezone));
        }
    }

    ValidationReport {
        is_valid: errors.is_empty() && missing_fields.is_empty(),
        errors,
        warnings,
        missing_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::types::{SocialLink, SocialPlatform};

    fn base_brand() -> Brand {
        Brand::default_assets()
    }

    fn link(platform: SocialPlatform, label: &str, url: &str) -> SocialLink {
        SocialLink {
            platform,
            label: label.to_string(),
            url: url.to_string(),
            icon: None,
            open_in_new_tab: None,
            order: None,
        }
    }

    #[test]
    fn test_color_formats() {
        assert!(is_valid_color("#fff"));
        assert!(is_valid_color("#3b82f6"));
        assert!(is_valid_color("#3B82F6FF"));
        assert!(is_valid_color("rgb(59, 130, 246)"));
        assert!(is_valid_color("rgba(59, 130, 246, 0.5)"));
        assert!(is_valid_color("hsl(217, 91%, 60%)"));
        assert!(is_valid_color("hsla(217, 91%, 60%, 0.8)"));

        assert!(!is_valid_color("blue"));
        assert!(!is_valid_color("#gg0000"));
        assert!(!is_valid_color("rgb(59, 130)"));
        assert!(!is_valid_color(""));
    }

    #[test]
    fn test_email_formats() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("ada.lovelace+tag@sub.example.co"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example@com.co"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_default_assets_are_valid() {
        let report = validate_brand(&base_brand());
        assert!(report.is_valid, "errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
        assert!(report.missing_fields.is_empty());
    }

    #[test]
    fn test_invalid_primary_color() {
        let mut brand = base_brand();
        brand.visual.colors.primary = "not-a-color".to_string();

        let report = validate_brand(&brand);
        assert!(!report.is_valid);
        assert!(report
            .errors
            .contains(&"Invalid primary color format".to_string()));
    }

    #[test]
    fn test_missing_structural_fields() {
        let mut brand = base_brand();
        brand.version = String::new();
        brand.visual.colors.accent = String::new();

        let report = validate_brand(&brand);
        assert!(!report.is_valid);
        assert_eq!(
            report.missing_fields,
            vec!["version".to_string(), "visual.colors.accent".to_string()]
        );
    }

    #[test]
    fn test_invalid_timestamps() {
        let mut brand = base_brand();
        brand.created_at = "yesterday".to_string();
        brand.updated_at = "2026-13-99T99:99:99Z".to_string();

        let report = validate_brand(&brand);
        assert!(report
            .errors
            .contains(&"Invalid createdAt timestamp format".to_string()));
        assert!(report
            .errors
            .contains(&"Invalid updatedAt timestamp format".to_string()));
    }

    #[test]
    fn test_invalid_email_is_error() {
        let mut brand = base_brand();
        brand.personal.email = "not-an-email".to_string();

        let report = validate_brand(&brand);
        assert!(report.errors.contains(&"Invalid email format".to_string()));
    }

    #[test]
    fn test_social_link_positions_are_one_based() {
        let mut brand = base_brand();
        brand.personal.social.links = vec![
            link(
                SocialPlatform::Github,
                "GitHub",
                "https://github.com/octocat",
            ),
            link(SocialPlatform::Twitter, "", "not a url"),
        ];

        let report = validate_brand(&brand);
        assert!(report
            .errors
            .contains(&"Social link 2: Invalid URL format".to_string()));
        assert!(report
            .errors
            .contains(&"Social link 2: Label is required".to_string()));
    }

    #[test]
    fn test_duplicate_platforms_warn() {
        let mut brand = base_brand();
        brand.personal.social.links = vec![
            link(SocialPlatform::Github, "Work", "https://github.com/work"),
            link(SocialPlatform::Github, "Play", "https://github.com/play"),
        ];

        let report = validate_brand(&brand);
        assert!(report.is_valid);
        assert!(report
            .warnings
            .contains(&"Duplicate social platforms detected: github".to_string()));
    }

    #[test]
    fn test_identical_primary_and_accent_warn() {
        let mut brand = base_brand();
        brand.visual.colors.accent = brand.visual.colors.primary.clone();

        let report = validate_brand(&brand);
        assert!(report.is_valid);
        assert!(report.warnings.iter().any(|w| w.contains("identical")));
    }

    #[test]
    fn test_uncommon_license_warns() {
        let mut brand = base_brand();
        brand.defaults.license = "WTFPL".to_string();

        let report = validate_brand(&brand);
        assert!(report.is_valid);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.starts_with("Uncommon license: WTFPL")));
    }

    #[test]
    fn test_language_and_timezone_shapes() {
        let mut brand = base_brand();
        brand.defaults.language = Some("english".to_string());
        brand.defaults.timezone = Some("Mars Base One".to_string());

        let report = validate_brand(&brand);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("Language code format")));
        assert!(report
            .warnings
            .contains(&"Invalid timezone: Mars Base One".to_string()));

        brand.defaults.language = Some("zh-CN".to_string());
        brand.defaults.timezone = Some("America/New_York".to_string());
        let report = validate_brand(&brand);
        assert!(report.warnings.is_empty());
    }
}
