//! CLI bootstrap: logging and probe wiring.

use std::path::PathBuf;

use buildenv_core::{FixedInstances, Probes};
use tracing_subscriber::EnvFilter;

use crate::commands::Commands;
use crate::error::CliError;
use crate::parser::Cli;

/// Settings for one invocation, taken from parsed flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub command: Commands,
    pub json: bool,
    pub verbose: bool,
    /// Replaces the system setup catalog when set.
    pub instances_file: Option<PathBuf>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            command: cli.command.unwrap_or_default(),
            json: cli.json,
            verbose: cli.verbose,
            instances_file: cli.instances,
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Probes for the real process, with the instance file swapped in if given.
pub fn build_probes(config: &CliConfig) -> Result<Probes, CliError> {
    let probes = Probes::system();
    let Some(path) = &config.instances_file else {
        return Ok(probes);
    };

    let instances = FixedInstances::load(path)?;
    tracing::debug!(path = %path.display(), "Using IDE instances from file");
    Ok(probes.with_instances(instances))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn config_defaults_to_show() {
        let config = CliConfig::from(Cli::parse_from(["buildenv"]));
        assert_eq!(config.command, Commands::Show);
        assert!(config.instances_file.is_none());
    }

    #[test]
    fn instances_file_replaces_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("instances.json");
        std::fs::write(
            &file,
            r#"[{"name": "VS", "root": "/opt/vs", "version": "15.9"}]"#,
        )
        .unwrap();

        let config = CliConfig::from(Cli::parse_from([
            "buildenv",
            "--instances",
            file.to_str().unwrap(),
        ]));
        let probes = build_probes(&config).unwrap();

        let instances = probes.instances.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].name, "VS");
    }

    #[test]
    fn missing_instances_file_is_a_catalog_error() {
        let config = CliConfig {
            command: Commands::Show,
            json: false,
            verbose: false,
            instances_file: Some(PathBuf::from("/definitely/not/here.json")),
        };
        let err = build_probes(&config).unwrap_err();
        assert_eq!(err.exit_code(), 65);
    }
}
