#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod environment;
pub mod instances;
pub mod paths;
pub mod probes;
pub mod profile;
pub mod resolver;
pub mod version;

#[cfg(test)]
pub(crate) mod test_utils;

pub use environment::{BuildEnvironment, BuildEnvironmentMode, EnvironmentCell, ResetError};
pub use instances::{CatalogError, FixedInstances, IdeInstance, InstanceLocator, SetupCatalogLocator};
pub use paths::{FsProvider, SystemFs};
pub use probes::{EnvProvider, FixedEnv, FixedHost, HostProbe, Probes, SystemEnv, SystemHost};
pub use profile::{HostFlavor, ProfileError, ToolProfile};
pub use resolver::{CandidateSource, resolve};
pub use version::{InstanceVersion, VersionMatcher, VersionParseError};
