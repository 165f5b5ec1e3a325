//! Project scaffolding: render a template tree into a target directory.
//!
//! Text files whose extension is on the render allowlist go through Tera with
//! the full template context. Everything else is copied byte for byte. A file
//! that fails to render is copied verbatim with a warning so one broken
//! template never aborts a whole scaffold.

use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use launcher_core::template::TemplateContext;
use regex::Regex;
use tera::Tera;
use tracing::{debug, warn};

use crate::catalog::ResolvedTemplate;
use crate::error::{Error, Result};

/// File extensions substituted through the template engine
const RENDERED_EXTENSIONS: &[&str] = &[
    "astro", "ts", "tsx", "js", "jsx", "mjs", "md", "mdx", "json", "yaml", "yml", "html", "css",
    "svg",
];

static PROJECT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("project name regex is valid"));

/// Check a project name against the allowed shape (`my-site`, `blog2`).
pub fn validate_project_name(name: &str) -> Result<()> {
    if PROJECT_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(Error::invalid_project_name(name))
    }
}

/// Brand record written at the root of every generated project
pub const BRAND_FILE: &str = "brand.yaml";

/// Scaffolding behavior switches
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Write into a non-empty target
    pub force: bool,
    /// Compute the file plan without touching the filesystem
    pub dry_run: bool,
}

/// Outcome of a scaffolding run
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub target: Utf8PathBuf,
    /// Files produced by the template engine, plus the brand record
    pub rendered: Vec<Utf8PathBuf>,
    /// Files copied verbatim
    pub copied: Vec<Utf8PathBuf>,
}

impl ScaffoldReport {
    /// All target paths in this report, sorted
    pub fn files(&self) -> Vec<&Utf8PathBuf> {
        let mut files: Vec<&Utf8PathBuf> = self.rendered.iter().chain(&self.copied).collect();
        files.sort();
        files
    }

    /// Total number of files written (or planned)
    pub fn file_count(&self) -> usize {
        self.rendered.len() + self.copied.len()
    }
}

/// Template renderer for whole project trees
#[derive(Debug, Default)]
pub struct Scaffolder;

impl Scaffolder {
    /// Create a new scaffolder
    pub fn new() -> Self {
        Self
    }

    /// Render one template string against a context
    pub fn render_str(
        &self,
        name: &str,
        input: &str,
        context: &TemplateContext,
    ) -> Result<String> {
        let tera_context = context.to_tera_context()?;
        let mut tera = Tera::default();
        tera.add_raw_template(name, input)?;
        Ok(tera.render(name, &tera_context)?)
    }

    /// Materialize a resolved template into `target`.
    ///
    /// Refuses a non-empty target unless `options.force` is set. With
    /// `options.dry_run` the report lists the paths that would be written
    /// and nothing is created.
    pub fn scaffold(
        &self,
        template: &ResolvedTemplate,
        context: &TemplateContext,
        target: &Utf8Path,
        options: &ScaffoldOptions,
    ) -> Result<ScaffoldReport> {
        if target.exists() && !options.force {
            let occupied = !target.is_dir() || target.read_dir_utf8()?.next().is_some();
            if occupied {
                return Err(Error::target_not_empty(target.as_str()));
            }
        }

        let entries = template.entries()?;
        let tera_context = context.to_tera_context()?;
        debug!(
            "Scaffolding template '{}' into {} ({} files)",
            template.metadata.name,
            target,
            entries.len()
        );

        let mut report = ScaffoldReport {
            target: target.to_owned(),
            rendered: Vec::new(),
            copied: Vec::new(),
        };

        if !options.dry_run {
            std::fs::create_dir_all(target)?;
        }

        for entry in &entries {
            let dest = target.join(&entry.relative);
            let text = should_render(&entry.relative)
                .then(|| std::str::from_utf8(&entry.contents).ok())
                .flatten();

            if options.dry_run {
                match text {
                    Some(_) => report.rendered.push(dest),
                    None => report.copied.push(dest),
                }
                continue;
            }

            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }

            match text {
                Some(text) => {
                    let mut tera = Tera::default();
                    let name = entry.relative.as_str();
                    let rendered = tera
                        .add_raw_template(name, text)
                        .and_then(|_| tera.render(name, &tera_context));
                    match rendered {
                        Ok(output) => {
                            std::fs::write(&dest, output)?;
                            report.rendered.push(dest);
                        }
                        Err(e) => {
                            warn!("Failed to render {}, copying verbatim: {}", entry.relative, e);
                            std::fs::write(&dest, text)?;
                            report.copied.push(dest);
                        }
                    }
                }
                None => {
                    std::fs::write(&dest, &entry.contents)?;
                    report.copied.push(dest);
                }
            }
        }

        let brand_path = target.join(BRAND_FILE);
        if !options.dry_run {
            let yaml = serde_yaml_ng::to_string(&context.brand.brand)?;
            std::fs::write(&brand_path, yaml)?;
        }
        report.rendered.push(brand_path);

        Ok(report)
    }
}

fn should_render(relative: &Utf8Path) -> bool {
    match relative.extension() {
        Some(ext) => RENDERED_EXTENSIONS.contains(&ext),
        // Extension-less dotfiles (.gitignore, .npmrc) hold substitutable text
        None => relative
            .file_name()
            .is_some_and(|name| name.starts_with('.')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplateSource;
    use launcher_core::brand::Brand;
    use launcher_core::project::ProjectType;
    use launcher_core::template::{ProjectProfile, TemplateContextBuilder, TemplateMetadata};

    fn test_metadata() -> TemplateMetadata {
        TemplateMetadata {
            name: "unit".to_string(),
            display_name: "Unit".to_string(),
            description: "Fixture template".to_string(),
            version: "0.0.1".to_string(),
            tags: vec![],
            features: vec![],
            project_type: ProjectType::Demo,
        }
    }

    fn test_context() -> TemplateContext {
        let mut brand = Brand::default_assets();
        brand.personal.name = "Ada".to_string();
        let profile = ProjectProfile {
            name: "my-site".to_string(),
            description: "A fixture project".to_string(),
            project_type: ProjectType::Demo,
            repository: None,
            site: None,
            author: None,
            license: None,
            version: None,
            keywords: vec![],
        };
        TemplateContextBuilder::new(brand, profile).build()
    }

    fn fixture_template(dir: &Utf8Path, files: &[(&str, &str)]) -> ResolvedTemplate {
        for (path, contents) in files {
            let full = dir.join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create fixture dirs");
            }
            std::fs::write(&full, contents).expect("Failed to write fixture file");
        }
        ResolvedTemplate {
            metadata: test_metadata(),
            source: TemplateSource::Directory(dir.to_owned()),
        }
    }

    fn temp_dirs() -> (tempfile::TempDir, Utf8PathBuf, Utf8PathBuf) {
        let guard = tempfile::TempDir::new().expect("Failed to create temp dir");
        let root = Utf8PathBuf::from_path_buf(guard.path().to_path_buf())
            .expect("Temp dir path should be valid UTF-8");
        let tmpl = root.join("tmpl");
        let target = root.join("out");
        std::fs::create_dir_all(&tmpl).expect("Failed to create template dir");
        (guard, tmpl, target)
    }

    #[test]
    fn test_should_render_allowlist() {
        assert!(should_render(Utf8Path::new("src/pages/index.astro")));
        assert!(should_render(Utf8Path::new("package.json")));
        assert!(should_render(Utf8Path::new(".gitignore")));
        assert!(!should_render(Utf8Path::new("public/logo.png")));
        assert!(!should_render(Utf8Path::new("LICENSE")));
    }

    #[test]
    fn test_validate_project_name() {
        assert!(validate_project_name("my-site").is_ok());
        assert!(validate_project_name("blog2").is_ok());
        assert!(validate_project_name("My-Site").is_err());
        assert!(validate_project_name("2cool").is_err());
        assert!(validate_project_name("my_site").is_err());
        assert!(validate_project_name("").is_err());
    }

    #[test]
    fn test_scaffold_renders_and_copies() {
        let (_guard, tmpl, target) = temp_dirs();
        let template = fixture_template(
            &tmpl,
            &[
                ("README.md", "# {{ project.name }}"),
                ("public/logo.png", "raw-bytes"),
            ],
        );
        let context = test_context();

        let report = Scaffolder::new()
            .scaffold(&template, &context, &target, &ScaffoldOptions::default())
            .expect("scaffold succeeds");

        let readme =
            std::fs::read_to_string(target.join("README.md")).expect("README was written");
        assert_eq!(readme, "# my-site");
        assert_eq!(
            std::fs::read_to_string(target.join("public/logo.png")).expect("logo was written"),
            "raw-bytes"
        );
        assert_eq!(report.rendered.len(), 2); // README.md + brand.yaml
        assert_eq!(report.copied.len(), 1);
    }

    #[test]
    fn test_scaffold_writes_brand_record() {
        let (_guard, tmpl, target) = temp_dirs();
        let template = fixture_template(&tmpl, &[("index.html", "<p>hi</p>")]);
        let context = test_context();

        Scaffolder::new()
            .scaffold(&template, &context, &target, &ScaffoldOptions::default())
            .expect("scaffold succeeds");

        let brand_yaml =
            std::fs::read_to_string(target.join(BRAND_FILE)).expect("brand.yaml was written");
        let parsed: Brand = serde_yaml_ng::from_str(&brand_yaml).expect("brand.yaml parses");
        assert_eq!(parsed.personal.name, "Ada");
    }

    #[test]
    fn test_scaffold_refuses_occupied_target() {
        let (_guard, tmpl, target) = temp_dirs();
        let template = fixture_template(&tmpl, &[("index.html", "<p>hi</p>")]);
        std::fs::create_dir_all(&target).expect("Failed to create target");
        std::fs::write(target.join("existing.txt"), "keep me").expect("Failed to write");

        let err = Scaffolder::new()
            .scaffold(
                &template,
                &test_context(),
                &target,
                &ScaffoldOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::TargetNotEmpty { .. }));
    }

    #[test]
    fn test_scaffold_force_overwrites_occupied_target() {
        let (_guard, tmpl, target) = temp_dirs();
        let template = fixture_template(&tmpl, &[("index.html", "<p>hi</p>")]);
        std::fs::create_dir_all(&target).expect("Failed to create target");
        std::fs::write(target.join("existing.txt"), "keep me").expect("Failed to write");

        let options = ScaffoldOptions {
            force: true,
            ..Default::default()
        };
        Scaffolder::new()
            .scaffold(&template, &test_context(), &target, &options)
            .expect("forced scaffold succeeds");
        assert!(target.join("index.html").is_file());
    }

    #[test]
    fn test_scaffold_accepts_empty_existing_target() {
        let (_guard, tmpl, target) = temp_dirs();
        let template = fixture_template(&tmpl, &[("index.html", "<p>hi</p>")]);
        std::fs::create_dir_all(&target).expect("Failed to create target");

        Scaffolder::new()
            .scaffold(
                &template,
                &test_context(),
                &target,
                &ScaffoldOptions::default(),
            )
            .expect("scaffold into empty dir succeeds");
    }

    #[test]
    fn test_dry_run_plans_without_writing() {
        let (_guard, tmpl, target) = temp_dirs();
        let template = fixture_template(
            &tmpl,
            &[("README.md", "# {{ project.name }}"), ("LICENSE", "MIT")],
        );

        let options = ScaffoldOptions {
            dry_run: true,
            ..Default::default()
        };
        let report = Scaffolder::new()
            .scaffold(&template, &test_context(), &target, &options)
            .expect("dry run succeeds");

        assert!(!target.exists());
        assert_eq!(report.file_count(), 3); // README.md + LICENSE + brand.yaml
        assert!(report
            .files()
            .iter()
            .any(|p| p.as_str().ends_with(BRAND_FILE)));
    }

    #[test]
    fn test_broken_template_is_copied_verbatim() {
        let (_guard, tmpl, target) = temp_dirs();
        let template = fixture_template(&tmpl, &[("broken.md", "{{ unclosed")]);

        let report = Scaffolder::new()
            .scaffold(
                &template,
                &test_context(),
                &target,
                &ScaffoldOptions::default(),
            )
            .expect("scaffold survives a broken file");

        assert_eq!(
            std::fs::read_to_string(target.join("broken.md")).expect("file was written"),
            "{{ unclosed"
        );
        assert!(report.copied.iter().any(|p| p.as_str().ends_with("broken.md")));
    }

    #[test]
    fn test_render_str_substitutes_context() {
        let context = test_context();
        let out = Scaffolder::new()
            .render_str("probe", "{{ brand.personal.name }} / {{ project.name }}", &context)
            .expect("render succeeds");
        assert_eq!(out, "Ada / my-site");
    }

    #[test]
    fn test_nested_directories_are_created() {
        let (_guard, tmpl, target) = temp_dirs();
        let template = fixture_template(
            &tmpl,
            &[("src/pages/posts/first.md", "{{ project.description }}")],
        );

        Scaffolder::new()
            .scaffold(
                &template,
                &test_context(),
                &target,
                &ScaffoldOptions::default(),
            )
            .expect("scaffold succeeds");

        assert_eq!(
            std::fs::read_to_string(target.join("src/pages/posts/first.md"))
                .expect("nested file was written"),
            "A fixture project"
        );
    }
}
