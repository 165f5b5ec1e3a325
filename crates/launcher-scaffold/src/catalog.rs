//! Template catalog with embedded templates and on-disk overrides.
//!
//! Built-in templates ship inside the binary via rust-embed. A directory at
//! `<data-dir>/templates/<name>` containing a `manifest.yaml` overrides the
//! embedded template of the same name.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use launcher_core::template::TemplateMetadata;
use launcher_core::utils::default_data_dir;
use rust_embed::RustEmbed;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Per-template descriptor file name
pub const MANIFEST_FILE: &str = "manifest.yaml";

/// Subdirectory of the data dir that holds template overrides
pub const OVERRIDE_SUBDIR: &str = "templates";

/// Paths never copied out of a template tree
static EXCLUDED_PATHS: LazyLock<GlobSet> = LazyLock::new(|| {
    let patterns = [
        "**/node_modules",
        "**/node_modules/**",
        "**/dist",
        "**/dist/**",
        "**/.astro",
        "**/.astro/**",
        "**/coverage",
        "**/coverage/**",
        "**/.git",
        "**/.git/**",
        "**/*.min.js",
        "**/*.min.css",
    ];
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).expect("exclude patterns are valid globs"));
    }
    builder.build().expect("exclude glob set builds")
});

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates/"]
struct EmbeddedTemplates;

/// Returns true if a template-relative path must not be copied into projects.
pub fn is_excluded(relative: &Utf8Path) -> bool {
    EXCLUDED_PATHS.is_match(relative.as_str())
}

/// Where a resolved template's files come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compiled into the binary
    Embedded,
    /// User override directory
    Directory(Utf8PathBuf),
}

/// One file inside a template tree
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    /// Path relative to the template root
    pub relative: Utf8PathBuf,
    pub contents: Vec<u8>,
}

/// A template resolved to a concrete source
#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    pub metadata: TemplateMetadata,
    pub source: TemplateSource,
}

impl ResolvedTemplate {
    /// Collect the template's files, manifest and excluded paths removed,
    /// sorted by relative path.
    pub fn entries(&self) -> Result<Vec<TemplateEntry>> {
        let mut entries = match &self.source {
            TemplateSource::Embedded => embedded_entries(&self.metadata.name),
            TemplateSource::Directory(root) => directory_entries(root)?,
        };
        entries.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(entries)
    }
}

fn embedded_entries(name: &str) -> Vec<TemplateEntry> {
    let prefix = format!("{name}/");
    let mut entries = Vec::new();
    for path in EmbeddedTemplates::iter() {
        let Some(relative) = path.strip_prefix(&prefix) else {
            continue;
        };
        if relative == MANIFEST_FILE {
            continue;
        }
        let relative = Utf8PathBuf::from(relative);
        if is_excluded(&relative) {
            continue;
        }
        if let Some(file) = EmbeddedTemplates::get(&path) {
            entries.push(TemplateEntry {
                relative,
                contents: file.data.into_owned(),
            });
        }
    }
    entries
}

fn directory_entries(root: &Utf8Path) -> Result<Vec<TemplateEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root.as_std_path())
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root.as_std_path()) else {
            continue;
        };
        let Some(relative) = Utf8Path::from_path(relative) else {
            warn!("Skipping non-UTF-8 template path: {}", relative.display());
            continue;
        };
        if relative == Utf8Path::new(MANIFEST_FILE) || is_excluded(relative) {
            continue;
        }
        let contents = std::fs::read(entry.path())?;
        entries.push(TemplateEntry {
            relative: relative.to_owned(),
            contents,
        });
    }
    Ok(entries)
}

/// Catalog of available templates
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    override_root: Utf8PathBuf,
}

impl TemplateCatalog {
    /// Create a catalog rooted at the default data directory
    pub fn new() -> Result<Self> {
        Ok(Self::with_data_dir(default_data_dir()?))
    }

    /// Create a catalog with a custom data directory
    pub fn with_data_dir(data_dir: impl AsRef<Utf8Path>) -> Self {
        Self {
            override_root: data_dir.as_ref().join(OVERRIDE_SUBDIR),
        }
    }

    /// Directory scanned for template overrides
    pub fn override_root(&self) -> &Utf8Path {
        &self.override_root
    }

    /// Names of all known templates, overrides included, sorted
    pub fn template_names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = EmbeddedTemplates::iter()
            .filter_map(|path| {
                let (name, rest) = path.split_once('/')?;
                (rest == MANIFEST_FILE).then(|| name.to_string())
            })
            .collect();

        if let Ok(dir) = self.override_root.read_dir_utf8() {
            for entry in dir.flatten() {
                if entry.path().join(MANIFEST_FILE).is_file() {
                    names.insert(entry.file_name().to_string());
                }
            }
        }

        names.into_iter().collect()
    }

    /// Metadata for every template that has a readable manifest
    pub fn list(&self) -> Vec<TemplateMetadata> {
        self.template_names()
            .into_iter()
            .filter_map(|name| match self.resolve(&name) {
                Ok(resolved) => Some(resolved.metadata),
                Err(e) => {
                    warn!("Skipping template '{}': {}", name, e);
                    None
                }
            })
            .collect()
    }

    /// Resolve a template by name, preferring the on-disk override
    pub fn resolve(&self, name: &str) -> Result<ResolvedTemplate> {
        let override_dir = self.override_root.join(name);
        let override_manifest = override_dir.join(MANIFEST_FILE);
        if override_manifest.is_file() {
            debug!("Using template override at {}", override_dir);
            let raw = std::fs::read_to_string(&override_manifest)?;
            let metadata = parse_manifest(name, &raw)?;
            return Ok(ResolvedTemplate {
                metadata,
                source: TemplateSource::Directory(override_dir),
            });
        }
        if override_dir.is_dir() {
            warn!(
                "Ignoring template override without {} at {}",
                MANIFEST_FILE, override_dir
            );
        }

        let embedded_manifest = format!("{name}/{MANIFEST_FILE}");
        if let Some(file) = EmbeddedTemplates::get(&embedded_manifest) {
            let raw = String::from_utf8_lossy(&file.data);
            let metadata = parse_manifest(name, &raw)?;
            return Ok(ResolvedTemplate {
                metadata,
                source: TemplateSource::Embedded,
            });
        }

        Err(Error::template_not_found(name, &self.template_names()))
    }
}

fn parse_manifest(name: &str, raw: &str) -> Result<TemplateMetadata> {
    let metadata: TemplateMetadata = serde_yaml_ng::from_str(raw)
        .map_err(|e| Error::invalid_manifest(name, e.to_string()))?;
    if metadata.name != name {
        return Err(Error::invalid_manifest(
            name,
            format!("manifest declares name '{}'", metadata.name),
        ));
    }
    Ok(metadata)
}
