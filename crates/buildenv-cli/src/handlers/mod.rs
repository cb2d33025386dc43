//! Command handlers.
//!
//! Each handler writes to the given output so it can be tested without a
//! terminal.

pub mod instances;
pub mod mode;
pub mod show;

use std::io::Write;

use buildenv_core::Probes;

use crate::bootstrap::CliConfig;
use crate::commands::Commands;
use crate::error::CliError;

/// Run the configured command against `probes`.
pub fn dispatch(config: &CliConfig, probes: &Probes, out: &mut dyn Write) -> Result<(), CliError> {
    match config.command {
        Commands::Show => show::execute(probes, config.json, out),
        Commands::Mode => mode::execute(probes, config.json, out),
        Commands::Instances => instances::execute(probes, config.json, out),
    }
}
