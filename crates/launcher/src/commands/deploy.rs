//! `astro-launcher deploy` command handler

use anyhow::{anyhow, Result};
use camino::Utf8Path;

use launcher_core::project::ProjectStore;
use launcher_scaffold::{generate_deploy_artifacts, DeployOptions};

use crate::cli::DeployArgs;
use crate::output;

/// Generate GitHub Pages deployment configuration for a registered project
pub async fn run(args: DeployArgs, data_dir: &Utf8Path) -> Result<()> {
    output::header("Deploy Configuration");

    let mut store = ProjectStore::with_dir(data_dir.to_owned());
    store.initialize()?;

    let project = store.find_by_name(&args.name)?.ok_or_else(|| {
        anyhow!(
            "Project '{}' is not registered; 'astro-launcher list' shows known projects",
            args.name
        )
    })?;

    output::kv("Project", &project.name);
    output::kv("Path", project.path.as_str());
    if let Some(domain) = &args.custom_domain {
        output::kv("Custom domain", domain);
    }
    println!();

    let options = DeployOptions {
        skip_workflow: args.skip_workflow,
        custom_domain: args.custom_domain.clone(),
        force: args.force,
    };
    let report = generate_deploy_artifacts(&project.path, &project.name, &options)?;

    for file in &report.written {
        output::success(&format!("Wrote {}", display_path(file, &project.path)));
    }
    for file in &report.skipped {
        output::info(&format!(
            "Kept existing {}",
            display_path(file, &project.path)
        ));
    }

    if !report.is_git_repo {
        output::warning("No git repository found; DEPLOY.md covers initializing one");
    }

    println!();
    output::success("Deployment configuration generated");
    output::info(&format!(
        "Follow {}/DEPLOY.md to publish the site",
        project.path
    ));

    Ok(())
}

/// Path relative to the project directory when possible
fn display_path<'a>(file: &'a Utf8Path, project_dir: &Utf8Path) -> &'a Utf8Path {
    file.strip_prefix(project_dir).unwrap_or(file)
}
