//! Installed IDE instances.
//!
//! The resolver never discovers IDE installations on its own; it asks an
//! [`InstanceLocator`] for the records the IDE setup engine keeps and checks
//! candidate roots against them.

mod catalog;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::version::InstanceVersion;

pub use catalog::{CatalogError, SetupCatalogLocator};

/// One installed copy of the enclosing IDE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeInstance {
    pub name: String,
    pub root: PathBuf,
    pub version: InstanceVersion,
}

impl IdeInstance {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, version: InstanceVersion) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            version,
        }
    }
}

/// Source of installed-IDE records. Each call is a fresh enumeration.
#[cfg_attr(test, mockall::automock)]
pub trait InstanceLocator: Send + Sync {
    fn instances(&self) -> Vec<IdeInstance>;
}

/// A fixed list of instances, e.g. from a JSON file or a test fixture.
#[derive(Debug, Clone, Default)]
pub struct FixedInstances(Vec<IdeInstance>);

impl FixedInstances {
    pub const fn new(instances: Vec<IdeInstance>) -> Self {
        Self(instances)
    }

    #[must_use]
    pub fn with_instance(mut self, instance: IdeInstance) -> Self {
        self.0.push(instance);
        self
    }

    /// Parse a JSON array of `{"name", "root", "version"}` objects.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json)
            .map(Self)
            .map_err(|e| CatalogError::Parse {
                path: None,
                reason: e.to_string(),
            })
    }

    /// Load [`from_json`](Self::from_json) content from a file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_json(&content).map_err(|err| match err {
            CatalogError::Parse { reason, .. } => CatalogError::Parse {
                path: Some(path.to_path_buf()),
                reason,
            },
            other => other,
        })
    }
}

impl InstanceLocator for FixedInstances {
    fn instances(&self) -> Vec<IdeInstance> {
        self.0.clone()
    }
}
