//! astro-launcher CLI - Brand-aware Astro site scaffolding
//!
//! This is the main entry point for the astro-launcher command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    // Storage root: --data-dir beats ASTRO_LAUNCHER_HOME beats ~/.astro-launcher
    let data_dir = match cli.data_dir {
        Some(ref dir) => dir.clone(),
        None => launcher_core::default_data_dir()?,
    };

    // Run command
    match cli.command {
        Commands::Create(args) => commands::create::run(args, &data_dir).await,
        Commands::List(args) => commands::list::run(args, &data_dir).await,
        Commands::Deploy(args) => commands::deploy::run(args, &data_dir).await,
        Commands::Clean(args) => commands::clean::run(args, &data_dir).await,
        Commands::Config(args) => commands::config::run(args, &data_dir).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Store and renderer internals log at debug and below,
            // so the default stays readable; -v/-vv for more detail
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
