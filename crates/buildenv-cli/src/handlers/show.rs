//! Show command handler.
//!
//! Prints the whole snapshot, the diagnostic view of how the tool was found.

use std::io::Write;

use buildenv_core::{Probes, resolve};

use crate::error::CliError;

/// Resolve and print every snapshot field in `key = value` form, or as JSON.
pub fn execute(probes: &Probes, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let env = resolve(probes);
    if json {
        serde_json::to_writer_pretty(&mut *out, &env)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{env}")?;
    }
    Ok(())
}
