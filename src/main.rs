//! lazyload - defer off-screen images until they approach the viewport.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use lazyload::cli::{Cli, Commands, init, transform};
use lazyload::config::LazyLoadConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Commands::Init { force } => init::init_config(&cli.config, *force),
        Commands::Transform { args } => {
            let config = LazyLoadConfig::load_or_default(&cli.config)?;
            transform::run_transform(args, &config)
        }
    }
}
