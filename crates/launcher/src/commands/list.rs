//! `astro-launcher list` command handler

use anyhow::{Context, Result};
use camino::Utf8Path;
use tabled::{
    settings::{object::Columns, Modify, Style, Width},
    Table, Tabled,
};

use launcher_core::project::{ProjectFilter, ProjectSort, ProjectStore};

use crate::cli::ListArgs;
use crate::output;

/// Row in the project table
#[derive(Tabled)]
struct ProjectRow {
    name: String,
    #[tabled(rename = "type")]
    project_type: String,
    status: String,
    tags: String,
    updated: String,
}

/// List registered projects, most recently updated first
///
/// Supports:
/// - Filter by type: `astro-launcher list --type blog`
/// - Filter by status: `astro-launcher list --status active`
/// - Search: `astro-launcher list --search docs`
/// - JSON output: `astro-launcher list --json`
pub async fn run(args: ListArgs, data_dir: &Utf8Path) -> Result<()> {
    let mut store = ProjectStore::with_dir(data_dir.to_owned());
    store.initialize()?;

    let filter = ProjectFilter {
        project_type: args.project_type,
        status: args.status,
        tags: None,
        search: args.search.clone(),
    };
    let projects = store.filter_projects(&filter, &ProjectSort::default())?;

    if args.json {
        // Full records, not the trimmed table rows
        let json = serde_json::to_string_pretty(&projects)
            .context("Failed to serialize projects to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    if projects.is_empty() {
        let unfiltered =
            filter.project_type.is_none() && filter.status.is_none() && filter.search.is_none();
        if unfiltered {
            output::info("No projects registered yet");
            println!("  Create one with: astro-launcher create <name>");
        } else {
            output::warning("No projects match the given filters");
        }
        return Ok(());
    }

    let rows: Vec<ProjectRow> = projects
        .iter()
        .map(|project| ProjectRow {
            name: project.name.clone(),
            project_type: project.project_type.to_string(),
            status: project.status.to_string(),
            tags: if project.tags.is_empty() {
                "-".to_string()
            } else {
                project.tags.join(", ")
            },
            updated: short_date(&project.updated_at),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.with(Modify::new(Columns::new(3..4)).with(Width::wrap(30).keep_words(true)));
    println!("{}", table);

    println!();
    output::info(&format!("{} project(s)", projects.len()));

    Ok(())
}

/// Date part of an ISO-8601 timestamp
fn short_date(timestamp: &str) -> String {
    timestamp.split('T').next().unwrap_or(timestamp).to_string()
}
