//! # launcher-scaffold
//!
//! Scaffolding library for the astro-launcher CLI providing:
//! - Template catalog (embedded templates plus on-disk overrides)
//! - Brand-aware project tree rendering
//! - GitHub Pages deploy artifact generation
//!
//! # Examples
//!
//! ## Scaffold a project from the embedded base template
//!
//! ```no_run
//! use camino::Utf8Path;
//! use launcher_core::brand::Brand;
//! use launcher_core::template::{ProjectProfile, TemplateContextBuilder};
//! use launcher_scaffold::{ScaffoldOptions, Scaffolder, TemplateCatalog};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = TemplateCatalog::new()?;
//! let template = catalog.resolve("base")?;
//!
//! let profile = ProjectProfile {
//!     name: "my-site".to_string(),
//!     description: "Personal site".to_string(),
//!     project_type: template.metadata.project_type,
//!     repository: None,
//!     site: None,
//!     author: None,
//!     license: None,
//!     version: None,
//!     keywords: vec![],
//! };
//! let context = TemplateContextBuilder::new(Brand::default_assets(), profile)
//!     .with_template(template.metadata.clone())
//!     .build();
//!
//! let report = Scaffolder::new().scaffold(
//!     &template,
//!     &context,
//!     Utf8Path::new("/tmp/my-site"),
//!     &ScaffoldOptions::default(),
//! )?;
//! println!("created {} files", report.file_count());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod deploy;
pub mod error;
pub mod renderer;

pub use error::{Error, Result};

// Re-export the main entry points for convenience
pub use catalog::{ResolvedTemplate, TemplateCatalog, TemplateSource};
pub use deploy::{generate_deploy_artifacts, DeployOptions, DeployReport};
pub use renderer::{validate_project_name, ScaffoldOptions, ScaffoldReport, Scaffolder};
