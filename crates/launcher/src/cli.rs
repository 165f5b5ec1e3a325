//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use launcher_core::project::{ProjectStatus, ProjectType};

/// astro-launcher - Brand-aware Astro site scaffolding
#[derive(Parser, Debug)]
#[command(name = "astro-launcher")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Storage root (default: ~/.astro-launcher)
    #[arg(long, global = true)]
    pub data_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project from a template
    #[command(alias = "init")]
    Create(CreateArgs),

    /// List registered projects
    List(ListArgs),

    /// Generate deployment configuration for a project
    Deploy(DeployArgs),

    /// Remove registry records whose directories no longer exist
    Clean(CleanArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

// Create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project name (lowercase letters, digits, hyphens)
    pub name: String,

    /// Template to scaffold from (base/blog/tool)
    #[arg(short, long)]
    pub template: Option<String>,

    /// One-line project description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Git repository URL
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Skip dependency installation
    #[arg(long)]
    pub skip_install: bool,

    /// Overwrite an existing directory without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Show the file plan without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

// List command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by project type
    #[arg(long = "type", value_name = "TYPE")]
    pub project_type: Option<ProjectType>,

    /// Filter by status (active/archived/draft)
    #[arg(long)]
    pub status: Option<ProjectStatus>,

    /// Case-insensitive search across name, description, and tags
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Deploy command
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Registered project name
    pub name: String,

    /// Skip the GitHub Actions workflow file
    #[arg(long)]
    pub skip_workflow: bool,

    /// Custom domain written to public/CNAME
    #[arg(long)]
    pub custom_domain: Option<String>,

    /// Overwrite an existing workflow file
    #[arg(short, long)]
    pub force: bool,
}

// Clean command
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Show what would be removed without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print one configuration value
    Get(ConfigGetArgs),

    /// Set a configuration value
    Set(ConfigSetArgs),

    /// Print the full configuration
    List,

    /// Interactive brand setup wizard
    Brand,
}

#[derive(Args, Debug)]
pub struct ConfigGetArgs {
    /// Dot-separated key, e.g. brand.personal.name
    pub key: String,
}

#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Dot-separated key, e.g. brand.personal.name
    pub key: String,

    /// Value (parsed as JSON, falling back to a plain string)
    pub value: String,
}
