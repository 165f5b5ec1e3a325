//! `astro-launcher create` command handler

use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use dialoguer::{Confirm, Select};
use std::process::Command;

use launcher_core::brand::BrandStore;
use launcher_core::project::{CreateProjectOptions, ProjectStore};
use launcher_core::template::{ProjectProfile, TemplateContextBuilder};
use launcher_scaffold::{
    validate_project_name, ResolvedTemplate, ScaffoldOptions, Scaffolder, TemplateCatalog,
};

use crate::cli::CreateArgs;
use crate::output;

/// Create a new project from a template
pub async fn run(args: CreateArgs, data_dir: &Utf8Path) -> Result<()> {
    output::header("Create Project");

    validate_project_name(&args.name)?;

    let target = current_dir()?.join(&args.name);
    if target.exists() && !args.dry_run {
        if !args.force {
            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Directory '{}' already exists. Overwrite?",
                    args.name
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                output::info("Cancelled");
                return Ok(());
            }
        }
        std::fs::remove_dir_all(&target).context("Failed to remove existing directory")?;
    }

    let catalog = TemplateCatalog::with_data_dir(data_dir);
    let template = select_template(&catalog, args.template.as_deref())?;

    let description = args
        .description
        .clone()
        .unwrap_or_else(|| format!("{} project created with astro-launcher", args.name));

    output::kv("Name", &args.name);
    output::kv("Template", &template.metadata.name);
    output::kv("Description", &description);
    if let Some(repository) = &args.repository {
        output::kv("Repository", repository);
    }
    println!();

    // Brand assets feed the template context; first run seeds defaults
    let mut brand_store = BrandStore::with_dir(data_dir.to_owned());
    brand_store.initialize()?;
    let brand = brand_store.load()?;
    if brand.personal.name.is_empty() {
        output::warning("Brand profile is empty; run 'astro-launcher config brand' to set it up");
    }

    let profile = ProjectProfile {
        name: args.name.clone(),
        description: description.clone(),
        project_type: template.metadata.project_type,
        repository: args.repository.clone(),
        site: None,
        author: None,
        license: None,
        version: None,
        keywords: Vec::new(),
    };
    let context = TemplateContextBuilder::new(brand, profile)
        .with_template(template.metadata.clone())
        .build();

    let scaffold_options = ScaffoldOptions {
        force: false,
        dry_run: args.dry_run,
    };
    let report = Scaffolder::new().scaffold(&template, &context, &target, &scaffold_options)?;

    if args.dry_run {
        output::info(&format!(
            "Dry run: {} files would be written to {}",
            report.file_count(),
            target
        ));
        for file in report.files() {
            output::item(file.as_str());
        }
        println!();
        output::info("Nothing was written and the project was not registered");
        return Ok(());
    }

    output::success(&format!("Scaffolded {} files", report.file_count()));

    // Register the project so list/deploy/clean can find it
    let mut project_store = ProjectStore::with_dir(data_dir.to_owned());
    project_store.initialize()?;
    let project = project_store.create_project(CreateProjectOptions {
        name: args.name.clone(),
        description,
        project_type: template.metadata.project_type,
        path: target.clone(),
        repository: args.repository.clone(),
        site: context.project.site.clone(),
        tags: template.metadata.tags.clone(),
        version: Some(context.project.version.clone()),
    })?;
    tracing::debug!("Registered project {} ({})", project.name, project.id);

    let package_manager = detect_package_manager(&target);
    let installed = !args.skip_install && install_dependencies(&target, package_manager);

    println!();
    output::success(&format!("Project '{}' created successfully", args.name));
    println!();
    output::kv("Location", target.as_str());

    println!();
    output::info("Next steps:");
    output::step(1, &format!("cd {}", args.name));
    if installed {
        output::step(2, &format!("{} run dev", package_manager));
    } else {
        output::step(2, &format!("{} install", package_manager));
        output::step(3, &format!("{} run dev", package_manager));
    }
    println!();
    println!(
        "   Generate deployment config later with: astro-launcher deploy {}",
        args.name
    );

    Ok(())
}

fn current_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::current_dir().context("Failed to resolve current directory")?;
    Utf8PathBuf::from_path_buf(dir)
        .map_err(|dir| anyhow!("Current directory is not UTF-8: {}", dir.display()))
}

/// Resolve the template from the flag, or prompt with the catalog listing
fn select_template(catalog: &TemplateCatalog, flag: Option<&str>) -> Result<ResolvedTemplate> {
    if let Some(name) = flag {
        return Ok(catalog.resolve(name)?);
    }

    let templates = catalog.list();
    if templates.is_empty() {
        return Err(anyhow!("No templates available"));
    }

    let items: Vec<String> = templates
        .iter()
        .map(|t| format!("{} - {}", t.name, t.description))
        .collect();

    let selection = Select::new()
        .with_prompt("Select a template")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(catalog.resolve(&templates[selection].name)?)
}

/// Pick the package manager from the lockfile the template ships
fn detect_package_manager(project_dir: &Utf8Path) -> &'static str {
    if project_dir.join("pnpm-lock.yaml").exists() {
        "pnpm"
    } else if project_dir.join("yarn.lock").exists() {
        "yarn"
    } else {
        "npm"
    }
}

/// Run `<pm> install` in the project directory; returns false when skipped
fn install_dependencies(project_dir: &Utf8Path, package_manager: &str) -> bool {
    if which::which(package_manager).is_err() {
        output::warning(&format!(
            "{} not found on PATH; skipping dependency installation",
            package_manager
        ));
        return false;
    }

    let spinner = output::spinner(&format!("Installing dependencies with {}...", package_manager));
    let result = Command::new(package_manager)
        .arg("install")
        .current_dir(project_dir)
        .output();
    spinner.finish_and_clear();

    match result {
        Ok(install) if install.status.success() => {
            output::success(&format!("Dependencies installed with {}", package_manager));
            true
        }
        Ok(install) => {
            tracing::debug!(
                "{} install stderr: {}",
                package_manager,
                String::from_utf8_lossy(&install.stderr)
            );
            output::warning(&format!(
                "Dependency installation failed; run '{} install' manually",
                package_manager
            ));
            false
        }
        Err(e) => {
            output::warning(&format!(
                "Could not run {} install: {}; install dependencies manually",
                package_manager, e
            ));
            false
        }
    }
}
