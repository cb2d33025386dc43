//! Injectable inputs to the resolver.
//!
//! Everything the resolver reads about the outside world goes through a
//! [`Probes`] value:
//! - `env`: environment variables ([`EnvProvider`])
//! - `host`: argument zero, running image and base directory ([`HostProbe`])
//! - `instances`: installed IDE records ([`InstanceLocator`])
//! - `fs`: existence checks ([`FsProvider`])
//! - `profile`: the names being looked for ([`ToolProfile`])
//!
//! [`Probes::system`] wires the real process; tests build one with
//! [`Probes::empty`] and the `with_*` builders.

mod env;
mod host;

use std::fmt;

pub use env::{EnvProvider, FixedEnv, SystemEnv};
pub use host::{FixedHost, HostProbe, SystemHost};

#[cfg(test)]
pub use host::MockHostProbe;

use crate::instances::{FixedInstances, InstanceLocator, SetupCatalogLocator};
use crate::paths::{FsProvider, SystemFs};
use crate::profile::ToolProfile;

/// The complete set of inputs for one resolution.
pub struct Probes {
    pub env: Box<dyn EnvProvider>,
    pub host: Box<dyn HostProbe>,
    pub instances: Box<dyn InstanceLocator>,
    pub fs: Box<dyn FsProvider>,
    pub profile: ToolProfile,
}

impl Probes {
    /// Real environment, real process identity, the on-disk IDE setup catalog.
    pub fn system() -> Self {
        Self {
            env: Box::new(SystemEnv),
            host: Box::new(SystemHost),
            instances: Box::new(SetupCatalogLocator::from_env(&SystemEnv)),
            fs: Box::new(SystemFs),
            profile: ToolProfile::default(),
        }
    }

    /// No variables, no process identity, no instances; real filesystem.
    pub fn empty() -> Self {
        Self {
            env: Box::new(FixedEnv::new()),
            host: Box::new(FixedHost::new()),
            instances: Box::new(FixedInstances::default()),
            fs: Box::new(SystemFs),
            profile: ToolProfile::default(),
        }
    }

    #[must_use]
    pub fn with_env(mut self, env: impl EnvProvider + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl HostProbe + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    #[must_use]
    pub fn with_instances(mut self, instances: impl InstanceLocator + 'static) -> Self {
        self.instances = Box::new(instances);
        self
    }

    #[must_use]
    pub fn with_fs(mut self, fs: impl FsProvider + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: ToolProfile) -> Self {
        self.profile = profile;
        self
    }
}

impl Default for Probes {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for Probes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probes")
            .field("profile", &self.profile.exe_name())
            .finish_non_exhaustive()
    }
}
