//! Main CLI parser and global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Inspect how the build tool in this process would resolve its environment.
#[derive(Debug, Parser)]
#[command(name = "buildenv")]
#[command(about = "Show the resolved MSBuild environment")]
#[command(version = buildenv_build_info::LONG_VERSION)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// JSON file of IDE instances to use instead of the system setup catalog
    #[arg(long, global = true, env = "BUILDENV_INSTANCES", value_name = "FILE")]
    pub instances: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["buildenv", "mode", "--json", "-v", "--instances", "vs.json"]);
        assert!(cli.json);
        assert!(cli.verbose);
        assert_eq!(cli.instances, Some(PathBuf::from("vs.json")));
        assert!(matches!(cli.command, Some(Commands::Mode)));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["buildenv"]);
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }
}
