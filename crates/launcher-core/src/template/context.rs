//! Template rendering context
//!
//! Combines a brand record with per-project details into the document
//! handed to template rendering. Derived fields fill in whatever the
//! project did not specify, so templates can rely on every field being
//! present.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::brand::{Brand, BrandColors, SocialLink};
use crate::error::{Error, Result};
use crate::project::ProjectType;
use crate::utils::now_timestamp;

/// Links without an explicit order sort after every ordered link
const UNORDERED_ORDER: u32 = 999;

/// Size of the primary social-link subset when the brand does not say
const DEFAULT_PRIMARY_COUNT: usize = 4;

/// Version stamped on projects that do not declare one
const DEFAULT_PROJECT_VERSION: &str = "0.1.0";

static GITHUB_REPO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/([^/]+)/([^/]+)").expect("github repo pattern compiles")
});

/// Per-project details fed into the context builder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProfile {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// Descriptive metadata about the template being rendered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub version: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub project_type: ProjectType,
}

/// Complete rendering context
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContext {
    pub brand: BrandContext,
    pub project: ProjectContext,
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateMetadata>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, Value>,
}

/// Brand record plus derived display fields
#[derive(Debug, Clone, Serialize)]
pub struct BrandContext {
    #[serde(flatten)]
    pub brand: Brand,
    pub computed: BrandComputed,
}

/// Fields derived from the brand record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandComputed {
    pub primary_social_links: Vec<SocialLink>,
    pub full_display_name: String,
    pub css_variables: BTreeMap<String, String>,
}

/// Project details with every fallback resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    pub author: String,
    pub license: String,
    pub version: String,
    pub keywords: Vec<String>,
    pub computed: ProjectComputed,
}

/// Fields derived from the project details
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectComputed {
    pub safe_name: String,
    pub class_name: String,
    pub package_name: String,
    pub is_open_source: bool,
    pub type_display_name: String,
    /// Subpath the site is served under, `/` except for GitHub Pages
    /// project sites inferred from the repository URL
    pub base_path: String,
}

/// Builder assembling a [`TemplateContext`]
#[derive(Debug, Clone)]
pub struct TemplateContextBuilder {
    brand: Brand,
    project: ProjectProfile,
    template: Option<TemplateMetadata>,
    custom: BTreeMap<String, Value>,
}

impl TemplateContextBuilder {
    pub fn new(brand: Brand, project: ProjectProfile) -> Self {
        TemplateContextBuilder {
            brand,
            project,
            template: None,
            custom: BTreeMap::new(),
        }
    }

    /// Attach metadata about the template being rendered
    pub fn with_template(mut self, template: TemplateMetadata) -> Self {
        self.template = Some(template);
        self
    }

    /// Attach an extra value under `custom.<key>`
    pub fn with_custom(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }

    /// Resolve all derived fields into the final context
    pub fn build(self) -> TemplateContext {
        let brand = build_brand_context(self.brand);
        let project = build_project_context(self.project, &brand.brand);

        TemplateContext {
            brand,
            project,
            generated_at: now_timestamp(),
            template: self.template,
            custom: self.custom,
        }
    }
}

impl TemplateContext {
    /// Convert into a Tera rendering context
    pub fn to_tera_context(&self) -> Result<tera::Context> {
        tera::Context::from_serialize(self).map_err(|e| Error::Template(e.to_string()))
    }
}

fn build_brand_context(mut brand: Brand) -> BrandContext {
    if brand
        .personal
        .display_name
        .as_deref()
        .is_none_or(str::is_empty)
    {
        brand.personal.display_name = Some(brand.personal.name.clone());
    }

    brand
        .personal
        .social
        .links
        .sort_by_key(|link| link.order.unwrap_or(UNORDERED_ORDER));

    let primary_count = brand
        .personal
        .social
        .primary_count
        .unwrap_or(DEFAULT_PRIMARY_COUNT);
    let primary_social_links = brand
        .personal
        .social
        .links
        .iter()
        .take(primary_count)
        .cloned()
        .collect();

    let display_name = brand.personal.display_name.clone().unwrap_or_default();
    let full_display_name = match &brand.personal.company {
        Some(company) if !company.is_empty() => format!("{} @ {}", display_name, company),
        _ => display_name,
    };

    let computed = BrandComputed {
        primary_social_links,
        full_display_name,
        css_variables: css_variables(&brand.visual.colors),
    };

    BrandContext { brand, computed }
}

fn build_project_context(profile: ProjectProfile, brand: &Brand) -> ProjectContext {
    let author = profile
        .author
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| brand.personal.name.clone());
    let license = profile
        .license
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| brand.defaults.license.clone());
    let version = profile
        .version
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_PROJECT_VERSION.to_string());

    let base_path = if profile.site.is_some() {
        "/".to_string()
    } else {
        profile
            .repository
            .as_deref()
            .map(infer_base_path)
            .unwrap_or_else(|| "/".to_string())
    };
    let site = profile.site.or_else(|| {
        profile
            .repository
            .as_deref()
            .map(infer_site_from_repository)
    });

    let keywords = if profile.keywords.is_empty() {
        generate_keywords(&profile.name, profile.project_type, &brand.personal.name)
    } else {
        profile.keywords
    };

    let computed = ProjectComputed {
        safe_name: sanitize_name(&profile.name),
        class_name: to_pascal_case(&profile.name),
        package_name: sanitize_name(&profile.name),
        is_open_source: profile.repository.is_some(),
        type_display_name: profile.project_type.display_name().to_string(),
        base_path,
    };

    ProjectContext {
        name: profile.name,
        description: profile.description,
        project_type: profile.project_type,
        repository: profile.repository,
        site,
        author,
        license,
        version,
        keywords,
        computed,
    }
}

/// CSS custom properties for every color the palette actually sets
fn css_variables(colors: &BrandColors) -> BTreeMap<String, String> {
    let entries = [
        ("primary", Some(colors.primary.as_str())),
        ("accent", Some(colors.accent.as_str())),
        ("secondary", colors.secondary.as_deref()),
        ("background", colors.background.as_deref()),
        ("text", colors.text.as_deref()),
        ("border", colors.border.as_deref()),
        ("success", colors.success.as_deref()),
        ("warning", colors.warning.as_deref()),
        ("error", colors.error.as_deref()),
    ];

    let mut variables = BTreeMap::new();
    for (key, value) in entries {
        if let Some(value) = value {
            if !value.is_empty() {
                variables.insert(format!("--color-{}", to_kebab_case(key)), value.to_string());
            }
        }
    }
    variables
}

/// GitHub repositories map to their Pages URL; anything else passes through
fn infer_site_from_repository(repository: &str) -> String {
    if let Some(captures) = GITHUB_REPO_RE.captures(repository) {
        let owner = &captures[1];
        let repo = captures[2].trim_end_matches(".git");
        return format!("https://{}.github.io/{}", owner, repo);
    }
    repository.to_string()
}

fn infer_base_path(repository: &str) -> String {
    if let Some(captures) = GITHUB_REPO_RE.captures(repository) {
        let repo = captures[2].trim_end_matches(".git");
        return format!("/{}", repo);
    }
    "/".to_string()
}

fn generate_keywords(name: &str, project_type: ProjectType, brand_name: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    let mut push = |keyword: &str| {
        if !keyword.is_empty() && !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    };

    push(&name.to_lowercase());
    push(project_type.as_str());
    push(&brand_name.to_lowercase());
    for keyword in type_keywords(project_type) {
        push(keyword);
    }
    push("astro");
    push("typescript");
    push("web");

    keywords
}

fn type_keywords(project_type: ProjectType) -> &'static [&'static str] {
    match project_type {
        ProjectType::Demo => &["demo", "showcase"],
        ProjectType::Tool => &["tool", "utility"],
        ProjectType::Showcase => &["portfolio", "showcase"],
        ProjectType::Blog => &["blog", "article"],
        ProjectType::Docs => &["documentation", "docs"],
        ProjectType::Portfolio => &["portfolio", "resume"],
    }
}

/// Lowercased with anything outside `[a-zA-Z0-9-]` replaced by a dash
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .to_lowercase()
}

fn to_pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for c in name.chars() {
        if c == '_' || c.is_whitespace() {
            if !out.ends_with('-') {
                out.push('-');
            }
            previous_lower = false;
        } else if c.is_ascii_uppercase() {
            if previous_lower {
                out.push('-');
            }
            out.extend(c.to_lowercase());
            previous_lower = false;
        } else {
            previous_lower = c.is_ascii_lowercase();
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::{SocialLink, SocialPlatform};

    fn profile(name: &str, project_type: ProjectType) -> ProjectProfile {
        ProjectProfile {
            name: name.to_string(),
            description: "A test project".to_string(),
            project_type,
            repository: None,
            site: None,
            author: None,
            license: None,
            version: None,
            keywords: Vec::new(),
        }
    }

    fn named_brand(name: &str) -> Brand {
        let mut brand = Brand::default_assets();
        brand.personal.name = name.to_string();
        brand
    }

    fn link(platform: SocialPlatform, order: Option<u32>) -> SocialLink {
        SocialLink {
            platform,
            label: platform.as_str().to_string(),
            url: format!("https://example.com/{}", platform),
            icon: None,
            open_in_new_tab: None,
            order,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let context =
            TemplateContextBuilder::new(named_brand("Ada"), profile("demo", ProjectType::Demo))
                .build();
        assert_eq!(
            context.brand.brand.personal.display_name.as_deref(),
            Some("Ada")
        );
        assert_eq!(context.brand.computed.full_display_name, "Ada");
    }

    #[test]
    fn test_full_display_name_includes_company() {
        let mut brand = named_brand("Ada");
        brand.personal.display_name = Some("Lady Lovelace".to_string());
        brand.personal.company = Some("Analytical Engines".to_string());

        let context =
            TemplateContextBuilder::new(brand, profile("demo", ProjectType::Demo)).build();
        assert_eq!(
            context.brand.computed.full_display_name,
            "Lady Lovelace @ Analytical Engines"
        );
    }

    #[test]
    fn test_social_links_sorted_unordered_last() {
        let mut brand = named_brand("Ada");
        brand.personal.social.links = vec![
            link(SocialPlatform::Website, None),
            link(SocialPlatform::Github, Some(1)),
            link(SocialPlatform::Twitter, Some(2)),
        ];

        let context =
            TemplateContextBuilder::new(brand, profile("demo", ProjectType::Demo)).build();
        let platforms: Vec<_> = context
            .brand
            .brand
            .personal
            .social
            .links
            .iter()
            .map(|l| l.platform)
            .collect();
        assert_eq!(
            platforms,
            vec![
                SocialPlatform::Github,
                SocialPlatform::Twitter,
                SocialPlatform::Website
            ]
        );
    }

    #[test]
    fn test_primary_links_honor_count() {
        let mut brand = named_brand("Ada");
        brand.personal.social.links = vec![
            link(SocialPlatform::Github, Some(1)),
            link(SocialPlatform::Twitter, Some(2)),
            link(SocialPlatform::Linkedin, Some(3)),
        ];
        brand.personal.social.primary_count = Some(2);

        let context =
            TemplateContextBuilder::new(brand, profile("demo", ProjectType::Demo)).build();
        assert_eq!(context.brand.computed.primary_social_links.len(), 2);
        assert_eq!(
            context.brand.computed.primary_social_links[0].platform,
            SocialPlatform::Github
        );
    }

    #[test]
    fn test_css_variables_cover_set_colors_only() {
        let mut brand = named_brand("Ada");
        brand.visual.colors.background = Some("#ffffff".to_string());

        let context =
            TemplateContextBuilder::new(brand, profile("demo", ProjectType::Demo)).build();
        let vars = &context.brand.computed.css_variables;
        assert_eq!(vars.get("--color-primary").map(String::as_str), Some("#3b82f6"));
        assert_eq!(
            vars.get("--color-background").map(String::as_str),
            Some("#ffffff")
        );
        assert!(!vars.contains_key("--color-secondary"));
    }

    #[test]
    fn test_project_fallbacks_come_from_brand() {
        let context = TemplateContextBuilder::new(
            named_brand("Ada"),
            profile("weather-widget", ProjectType::Tool),
        )
        .build();

        assert_eq!(context.project.author, "Ada");
        assert_eq!(context.project.license, "MIT");
        assert_eq!(context.project.version, "0.1.0");
        assert!(!context.project.computed.is_open_source);
    }

    #[test]
    fn test_explicit_project_fields_win() {
        let mut p = profile("weather-widget", ProjectType::Tool);
        p.author = Some("Someone Else".to_string());
        p.license = Some("Apache-2.0".to_string());
        p.version = Some("2.0.0".to_string());

        let context = TemplateContextBuilder::new(named_brand("Ada"), p).build();
        assert_eq!(context.project.author, "Someone Else");
        assert_eq!(context.project.license, "Apache-2.0");
        assert_eq!(context.project.version, "2.0.0");
    }

    #[test]
    fn test_site_inferred_from_github_repository() {
        let mut p = profile("widget", ProjectType::Tool);
        p.repository = Some("https://github.com/ada/widget.git".to_string());

        let context = TemplateContextBuilder::new(named_brand("Ada"), p).build();
        assert_eq!(
            context.project.site.as_deref(),
            Some("https://ada.github.io/widget")
        );
        assert_eq!(context.project.computed.base_path, "/widget");
        assert!(context.project.computed.is_open_source);
    }

    #[test]
    fn test_non_github_repository_passes_through() {
        let mut p = profile("widget", ProjectType::Tool);
        p.repository = Some("https://gitlab.com/ada/widget".to_string());

        let context = TemplateContextBuilder::new(named_brand("Ada"), p).build();
        assert_eq!(
            context.project.site.as_deref(),
            Some("https://gitlab.com/ada/widget")
        );
        assert_eq!(context.project.computed.base_path, "/");
    }

    #[test]
    fn test_explicit_site_wins_over_inference() {
        let mut p = profile("widget", ProjectType::Tool);
        p.repository = Some("https://github.com/ada/widget".to_string());
        p.site = Some("https://widget.example.com".to_string());

        let context = TemplateContextBuilder::new(named_brand("Ada"), p).build();
        assert_eq!(
            context.project.site.as_deref(),
            Some("https://widget.example.com")
        );
        assert_eq!(context.project.computed.base_path, "/");
    }

    #[test]
    fn test_generated_keywords() {
        let context = TemplateContextBuilder::new(
            named_brand("Ada"),
            profile("My-Blog", ProjectType::Blog),
        )
        .build();

        let keywords = &context.project.keywords;
        assert_eq!(
            keywords,
            &vec![
                "my-blog".to_string(),
                "blog".to_string(),
                "ada".to_string(),
                "article".to_string(),
                "astro".to_string(),
                "typescript".to_string(),
                "web".to_string(),
            ]
        );
    }

    #[test]
    fn test_explicit_keywords_kept() {
        let mut p = profile("widget", ProjectType::Tool);
        p.keywords = vec!["one".to_string(), "two".to_string()];

        let context = TemplateContextBuilder::new(named_brand("Ada"), p).build();
        assert_eq!(context.project.keywords, vec!["one", "two"]);
    }

    #[test]
    fn test_name_transformations() {
        assert_eq!(sanitize_name("My Cool App!"), "my-cool-app-");
        assert_eq!(to_pascal_case("my-cool_app"), "MyCoolApp");
        assert_eq!(to_pascal_case("weather widget"), "WeatherWidget");
        assert_eq!(to_kebab_case("backgroundColor"), "background-color");
        assert_eq!(to_kebab_case("some_mixed Name"), "some-mixed-name");
    }

    #[test]
    fn test_type_display_names() {
        let context = TemplateContextBuilder::new(
            named_brand("Ada"),
            profile("handbook", ProjectType::Docs),
        )
        .build();
        assert_eq!(context.project.computed.type_display_name, "Documentation");
    }

    #[test]
    fn test_renders_through_tera() {
        let mut brand = named_brand("Ada");
        brand.personal.company = Some("Analytical Engines".to_string());

        let context = TemplateContextBuilder::new(brand, profile("widget", ProjectType::Tool))
            .with_custom("channel", serde_json::json!("stable"))
            .build();

        let mut tera = tera::Tera::default();
        tera.add_raw_template(
            "probe",
            "{{ project.computed.packageName }} by {{ brand.computed.fullDisplayName }} ({{ custom.channel }})",
        )
        .unwrap();

        let rendered = tera
            .render("probe", &context.to_tera_context().unwrap())
            .unwrap();
        assert_eq!(rendered, "widget by Ada @ Analytical Engines (stable)");
    }

    #[test]
    fn test_context_serializes_camel_case() {
        let context = TemplateContextBuilder::new(
            named_brand("Ada"),
            profile("widget", ProjectType::Tool),
        )
        .build();

        let json = serde_json::to_value(&context).unwrap();
        assert!(json.get("generatedAt").is_some());
        assert!(json["project"]["computed"].get("typeDisplayName").is_some());
        assert_eq!(json["project"]["type"], "tool");
        // Brand fields flatten to the top of the brand section
        assert!(json["brand"].get("personal").is_some());
        assert!(json["brand"]["computed"].get("cssVariables").is_some());
    }
}
