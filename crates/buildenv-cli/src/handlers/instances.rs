//! Instances command handler.
//!
//! Lists what the instance locator reports and whether each record's version
//! is one the resolver would accept.

use std::io::Write;
use std::path::PathBuf;

use buildenv_core::{IdeInstance, InstanceVersion, Probes};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
struct InstanceRow {
    name: String,
    root: PathBuf,
    version: InstanceVersion,
    accepted: bool,
}

pub fn execute(probes: &Probes, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let matcher = probes.profile.version_matcher();
    let rows: Vec<InstanceRow> = probes
        .instances
        .instances()
        .into_iter()
        .map(|instance| {
            let accepted = matcher.is_some_and(|m| m.accepts_version(&instance));
            let IdeInstance {
                name,
                root,
                version,
            } = instance;
            InstanceRow {
                name,
                root,
                version,
                accepted,
            }
        })
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(out, "No IDE instances found")?;
        return Ok(());
    }
    for row in &rows {
        let status = if row.accepted { "accepted" } else { "rejected" };
        let version = row.version.to_string();
        writeln!(
            out,
            "{status:<10} {version:<16} {}  {}",
            row.name,
            row.root.display()
        )?;
    }
    Ok(())
}
