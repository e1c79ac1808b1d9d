//! pandoc-reader - Pandoc Markdown to HTML fragments with metadata.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use pandoc_reader::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Read { args } => cli::read::run_read(args, config),
        Commands::Check => cli::check::run_check(config),
        Commands::Init { dry, force } => cli::init::run_init(*dry, *force),
    }
}
