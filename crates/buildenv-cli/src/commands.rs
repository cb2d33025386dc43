//! Available subcommands.

use clap::Subcommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Subcommand)]
pub enum Commands {
    /// Show every resolved field (default)
    #[default]
    Show,

    /// Print only the deployment mode
    Mode,

    /// List installed IDE instances and whether their version is accepted
    Instances,
}
