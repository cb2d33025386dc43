//! IDE setup catalog on disk.
//!
//! The IDE installer records every instance as
//! `%ProgramData%/Microsoft/VisualStudio/Packages/_Instances/<id>/state.json`.
//! Reading those files gives the same records the setup API would return,
//! without a COM dependency.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::{IdeInstance, InstanceLocator};
use crate::probes::EnvProvider;
use crate::version::{InstanceVersion, VersionParseError};

const PROGRAM_DATA_VAR: &str = "ProgramData";
const INSTANCES_SUBDIR: [&str; 4] = ["Microsoft", "VisualStudio", "Packages", "_Instances"];
const STATE_FILE: &str = "state.json";

/// Errors reading IDE instance records.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Malformed instance data{}: {reason}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        reason: String,
    },

    #[error("Instance {path} has an invalid version: {source}")]
    InvalidVersion {
        path: PathBuf,
        #[source]
        source: VersionParseError,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateFile {
    installation_name: Option<String>,
    installation_path: PathBuf,
    installation_version: String,
}

/// Production [`InstanceLocator`] reading the setup catalog directory.
#[derive(Debug, Clone, Default)]
pub struct SetupCatalogLocator {
    instances_dir: Option<PathBuf>,
}

impl SetupCatalogLocator {
    /// Locate the catalog under the `ProgramData` directory, if that variable is set.
    pub fn from_env(env: &dyn EnvProvider) -> Self {
        let instances_dir = env
            .get(PROGRAM_DATA_VAR)
            .filter(|value| !value.is_empty())
            .map(|program_data| {
                INSTANCES_SUBDIR
                    .iter()
                    .fold(PathBuf::from(program_data), |dir, part| dir.join(part))
            });
        Self { instances_dir }
    }

    /// Read the catalog from an explicit `_Instances` directory.
    pub fn with_dir(instances_dir: impl Into<PathBuf>) -> Self {
        Self {
            instances_dir: Some(instances_dir.into()),
        }
    }

    pub fn instances_dir(&self) -> Option<&Path> {
        self.instances_dir.as_deref()
    }

    fn read_state(state_path: &Path) -> Result<IdeInstance, CatalogError> {
        let content = fs::read_to_string(state_path).map_err(|e| CatalogError::Read {
            path: state_path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let state: StateFile =
            serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
                path: Some(state_path.to_path_buf()),
                reason: e.to_string(),
            })?;

        let version = state
            .installation_version
            .parse::<InstanceVersion>()
            .map_err(|source| CatalogError::InvalidVersion {
                path: state_path.to_path_buf(),
                source,
            })?;

        let name = state.installation_name.unwrap_or_else(|| {
            state_path
                .parent()
                .and_then(Path::file_name)
                .map(|id| id.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        Ok(IdeInstance::new(name, state.installation_path, version))
    }
}

impl InstanceLocator for SetupCatalogLocator {
    fn instances(&self) -> Vec<IdeInstance> {
        let Some(dir) = &self.instances_dir else {
            return Vec::new();
        };

        let Ok(entries) = fs::read_dir(dir) else {
            tracing::debug!(dir = %dir.display(), "No IDE setup catalog");
            return Vec::new();
        };

        let mut state_files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path().join(STATE_FILE))
            .filter(|state| state.is_file())
            .collect();
        state_files.sort();

        state_files
            .iter()
            .filter_map(|state| match Self::read_state(state) {
                Ok(instance) => Some(instance),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable IDE instance record");
                    None
                }
            })
            .collect()
    }
}
