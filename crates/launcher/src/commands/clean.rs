//! `astro-launcher clean` command handler

use anyhow::Result;
use camino::Utf8Path;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use launcher_core::project::{ProjectInfo, ProjectStore};

use crate::cli::CleanArgs;
use crate::output;

/// Remove registry records whose project directories are gone
pub async fn run(args: CleanArgs, data_dir: &Utf8Path) -> Result<()> {
    output::header("Clean Registry");

    let mut store = ProjectStore::with_dir(data_dir.to_owned());
    store.initialize()?;

    let spinner = output::spinner("Scanning registered projects...");
    let projects = store.list_projects()?;
    let (valid, stale): (Vec<ProjectInfo>, Vec<ProjectInfo>) = projects
        .into_iter()
        .partition(|project| project.path.is_dir());
    spinner.finish_and_clear();

    if valid.is_empty() && stale.is_empty() {
        output::info("No projects registered");
        return Ok(());
    }

    output::kv("Registered", &(valid.len() + stale.len()).to_string());
    output::kv("Valid", &valid.len().green().to_string());
    output::kv("Stale", &stale.len().red().to_string());

    if stale.is_empty() {
        println!();
        output::success("Every registered project still exists on disk");
        return Ok(());
    }

    println!();
    output::info("Stale records (directory missing):");
    for project in &stale {
        output::item(&format!("{} ({})", project.name.bold(), project.path));
    }

    if args.dry_run {
        println!();
        output::info("Dry run: no records were removed");
        return Ok(());
    }

    if !args.force {
        println!();
        output::info("Only registry records are removed; no files are touched");
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} stale record(s)?", stale.len()))
            .default(false)
            .interact()?;

        if !confirmed {
            output::info("Cancelled");
            return Ok(());
        }
    }

    let mut removed = 0usize;
    let mut failed = 0usize;
    for project in &stale {
        match store.delete_project(&project.id) {
            Ok(true) => removed += 1,
            Ok(false) => failed += 1,
            Err(e) => {
                failed += 1;
                output::error(&format!("Failed to remove '{}': {}", project.name, e));
            }
        }
    }

    println!();
    output::success(&format!("Removed {} stale record(s)", removed));
    if failed > 0 {
        output::warning(&format!("{} record(s) could not be removed", failed));
    }
    output::info(&format!("{} project(s) remain registered", valid.len()));

    Ok(())
}
