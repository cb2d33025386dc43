//! IDE instance versions and the version matcher.
//!
//! An IDE root found on disk is only trusted when an installed-instance record
//! claims that root **and** its major version equals the major version this
//! tool was built for.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::instances::IdeInstance;
use crate::paths::paths_equal;

/// Errors produced when parsing a dotted version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// The input was empty or whitespace.
    #[error("Version string is empty")]
    Empty,

    /// Versions have between two and four components.
    #[error("Version '{input}' has {count} components, expected 2 to 4")]
    ComponentCount { input: String, count: usize },

    /// A component is not a non-negative integer.
    #[error("Version '{input}' has a non-numeric component '{component}'")]
    InvalidComponent { input: String, component: String },
}

/// A `major.minor[.build[.revision]]` version as reported by IDE setup records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceVersion {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl InstanceVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }
}

impl FromStr for InstanceVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let parts: Vec<&str> = input.split('.').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(VersionParseError::ComponentCount {
                input: input.to_string(),
                count: parts.len(),
            });
        }

        let mut numbers = Vec::with_capacity(parts.len());
        for part in &parts {
            let value = part
                .parse::<u32>()
                .map_err(|_| VersionParseError::InvalidComponent {
                    input: input.to_string(),
                    component: (*part).to_string(),
                })?;
            numbers.push(value);
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            build: numbers.get(2).copied(),
            revision: numbers.get(3).copied(),
        })
    }
}

impl TryFrom<String> for InstanceVersion {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InstanceVersion> for String {
    fn from(version: InstanceVersion) -> Self {
        version.to_string()
    }
}

impl fmt::Display for InstanceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
            if let Some(revision) = self.revision {
                write!(f, ".{revision}")?;
            }
        }
        Ok(())
    }
}

/// Accepts or rejects IDE instances against the tool's compiled major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMatcher {
    compiled_major: u32,
}

impl VersionMatcher {
    pub const fn new(compiled_major: u32) -> Self {
        Self { compiled_major }
    }

    pub const fn compiled_major(&self) -> u32 {
        self.compiled_major
    }

    /// True if the instance was installed for the same major version as this tool.
    pub const fn accepts_version(&self, instance: &IdeInstance) -> bool {
        instance.version.major == self.compiled_major
    }

    /// True iff the instance claims `candidate_root` and its major version matches.
    pub fn accepts(&self, instance: &IdeInstance, candidate_root: &Path) -> bool {
        paths_equal(&instance.root, candidate_root) && self.accepts_version(instance)
    }

    /// First instance that [`accepts`](Self::accepts) the candidate root.
    ///
    /// Root matches with the wrong major version are skipped, never accepted.
    pub fn select<'a>(
        &self,
        instances: &'a [IdeInstance],
        candidate_root: &Path,
    ) -> Option<&'a IdeInstance> {
        instances.iter().find(|instance| {
            let accepted = self.accepts(instance, candidate_root);
            if !accepted && paths_equal(&instance.root, candidate_root) {
                self.log_version_mismatch(instance);
            }
            accepted
        })
    }

    fn log_version_mismatch(&self, instance: &IdeInstance) {
        tracing::debug!(
            instance = %instance.name,
            root = %instance.root.display(),
            version = %instance.version,
            expected_major = self.compiled_major,
            "IDE instance matches root but not version"
        );
    }
}
