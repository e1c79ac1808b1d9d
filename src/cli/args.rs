//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Convert Pandoc Markdown to HTML fragments with metadata
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: pandoc-reader.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert files and print each as a JSON object
    #[command(visible_alias = "r")]
    Read {
        #[command(flatten)]
        args: ReadArgs,
    },

    /// Validate the configuration, defaults files and converter
    #[command(visible_alias = "c")]
    Check,

    /// Write a commented pandoc-reader.toml to the current directory
    #[command(visible_alias = "i")]
    Init {
        /// Print the template to stdout instead of writing it
        #[arg(short, long)]
        dry: bool,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

/// Read command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ReadArgs {
    /// Markdown files to convert
    #[arg(value_name = "PATH", required = true, value_hint = clap::ValueHint::FilePath)]
    pub paths: Vec<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_read() {
        let cli = Cli::parse_from(["pandoc-reader", "-v", "read", "a.md", "b.md", "--pretty"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Read { args } => {
                assert_eq!(args.paths, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
                assert!(args.pretty);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::parse_from(["pandoc-reader", "check", "-C", "site/pandoc-reader.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("site/pandoc-reader.toml")));
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_read_requires_paths() {
        assert!(Cli::try_parse_from(["pandoc-reader", "read"]).is_err());
    }
}
