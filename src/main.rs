//! quire - a static blog generator for markdown posts.

mod cli;
mod config;
mod content;
mod core;
mod embed;
mod generator;
mod logger;
mod render;
mod search;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use core::BuildMode;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Init { name, dry } => cli::init::new_site(&config, name.is_some(), *dry),
        Commands::Build { build_args } => {
            cli::build::build_site(&config, BuildMode::from_dev_flag(build_args.dev), false)
                .map(|_| ())
        }
        Commands::Serve { .. } => cli::serve::serve_site(&config),
        Commands::Validate { dev } => {
            cli::validate::validate_site(&config, BuildMode::from_dev_flag(*dev))
        }
        Commands::Search { args } => cli::search::run_search(args, &config),
    }
}
