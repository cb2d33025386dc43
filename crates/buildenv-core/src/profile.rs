//! Tool profile: the names and layout conventions the resolver looks for.
//!
//! The defaults describe MSBuild shipped standalone or inside a Visual Studio
//! installation. Tests and embedders swap individual names with the `with_*`
//! builders instead of touching resolver code.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::paths::{file_stem_in, name_eq};
use crate::version::{InstanceVersion, VersionMatcher, VersionParseError};

/// Executable flavor of the tool's entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostFlavor {
    /// Native launcher (`MSBuild.exe`).
    Native,
    /// Entry point hosted by a managed runtime (`MSBuild.dll`).
    Managed,
}

impl HostFlavor {
    /// Flavor this crate was compiled for (`managed-host` feature).
    pub const CURRENT: Self = if cfg!(feature = "managed-host") {
        Self::Managed
    } else {
        Self::Native
    };

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Native => "exe",
            Self::Managed => "dll",
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Native => Self::Managed,
            Self::Managed => Self::Native,
        }
    }
}

/// Invalid profile contents. Only reachable through hand-built profiles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Tool executable stem cannot be empty")]
    EmptyExecutableStem,

    #[error("Profile field '{0}' cannot be empty")]
    EmptyField(&'static str),

    #[error("IDE version '{version}' is not a valid version: {source}")]
    InvalidIdeVersion {
        version: String,
        #[source]
        source: VersionParseError,
    },
}

/// Names and layout conventions for one build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolProfile {
    /// Stem of the tool executable (`MSBuild`).
    pub exe_stem: String,
    /// Other executables that identify a running tool process (`MSBuildTaskHost`).
    pub alternate_stems: Vec<String>,
    /// Which extension [`exe_name`](Self::exe_name) uses.
    pub flavor: HostFlavor,
    /// Environment variable naming the tool executable (`MSBUILD_EXE_PATH`).
    pub exe_path_variable: String,
    /// Suffix appended to the executable path to get its config file.
    pub config_suffix: String,
    /// IDE layout: `<root>/<product_dir>/<tools_version>/<bin_dir>[/<arch64_dir>]`.
    pub product_dir: String,
    pub tools_version: String,
    pub bin_dir: String,
    pub arch64_dir: String,
    /// IDE version this tool was compiled against; its major is the version epoch.
    pub ide_version: String,
    /// Developer-console variables naming the active IDE root and version.
    pub ide_root_variable: String,
    pub ide_version_variable: String,
    /// IDE host process stems and how deep they sit below the IDE root.
    pub ide_host_processes: Vec<String>,
    pub ide_host_depth: usize,
    /// Process-name prefixes of known test runners.
    pub test_runners: Vec<String>,
}

impl Default for ToolProfile {
    fn default() -> Self {
        Self::msbuild()
    }
}

impl ToolProfile {
    /// MSBuild 15 as installed standalone or under Visual Studio 2017.
    pub fn msbuild() -> Self {
        Self {
            exe_stem: "MSBuild".to_string(),
            alternate_stems: vec!["MSBuildTaskHost".to_string()],
            flavor: HostFlavor::CURRENT,
            exe_path_variable: "MSBUILD_EXE_PATH".to_string(),
            config_suffix: ".config".to_string(),
            product_dir: "MSBuild".to_string(),
            tools_version: "15.0".to_string(),
            bin_dir: "Bin".to_string(),
            arch64_dir: "amd64".to_string(),
            ide_version: "15.0".to_string(),
            ide_root_variable: "VSINSTALLDIR".to_string(),
            ide_version_variable: "VisualStudioVersion".to_string(),
            ide_host_processes: to_strings(&["devenv", "blend", "Microsoft.VisualStudio.Web.Host"]),
            ide_host_depth: 3,
            test_runners: to_strings(&[
                "xunit",
                "nunit",
                "mstest",
                "vstest",
                "taskrunner",
                "vstesthost",
                "qtagent32",
                "concurrent",
                "resharper",
                "mdhost",
                "te.processhost",
            ]),
        }
    }

    #[must_use]
    pub fn with_exe_stem(mut self, stem: impl Into<String>) -> Self {
        self.exe_stem = stem.into();
        self
    }

    #[must_use]
    pub const fn with_flavor(mut self, flavor: HostFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    #[must_use]
    pub fn with_ide_version(mut self, version: impl Into<String>) -> Self {
        self.ide_version = version.into();
        self
    }

    #[must_use]
    pub fn with_tools_version(mut self, version: impl Into<String>) -> Self {
        self.tools_version = version.into();
        self
    }

    /// Conventional executable name for the profile's flavor (`MSBuild.exe`).
    pub fn exe_name(&self) -> String {
        self.exe_name_for(self.flavor)
    }

    pub fn exe_name_for(&self, flavor: HostFlavor) -> String {
        format!("{}.{}", self.exe_stem, flavor.extension())
    }

    /// Executable names to probe in a directory, preferred flavor first.
    pub fn exe_names(&self) -> [String; 2] {
        [
            self.exe_name_for(self.flavor),
            self.exe_name_for(self.flavor.other()),
        ]
    }

    /// True if `path` names the tool (or an alternate) with a native or managed extension.
    pub fn is_tool_executable(&self, path: &Path) -> bool {
        let has_tool_extension = path.extension().is_some_and(|ext| {
            name_eq(ext, HostFlavor::Native.extension())
                || name_eq(ext, HostFlavor::Managed.extension())
        });
        if !has_tool_extension {
            return false;
        }

        file_stem_in(path, std::slice::from_ref(&self.exe_stem))
            || file_stem_in(path, &self.alternate_stems)
    }

    /// Where an IDE installation keeps this tool: `<root>/MSBuild/15.0/Bin/MSBuild.exe`.
    pub fn ide_tool_exe(&self, ide_root: &Path) -> PathBuf {
        ide_root
            .join(&self.product_dir)
            .join(&self.tools_version)
            .join(&self.bin_dir)
            .join(self.exe_name())
    }

    /// Compiled major version, if [`ide_version`](Self::ide_version) parses.
    pub fn compiled_major(&self) -> Option<u32> {
        self.ide_version
            .parse::<InstanceVersion>()
            .ok()
            .map(|v| v.major)
    }

    /// Matcher for this profile's version epoch.
    pub fn version_matcher(&self) -> Option<VersionMatcher> {
        self.compiled_major().map(VersionMatcher::new)
    }

    /// Check that every name the resolver depends on is usable.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.exe_stem.trim().is_empty() {
            return Err(ProfileError::EmptyExecutableStem);
        }

        let required = [
            ("exe_path_variable", &self.exe_path_variable),
            ("product_dir", &self.product_dir),
            ("tools_version", &self.tools_version),
            ("bin_dir", &self.bin_dir),
            ("arch64_dir", &self.arch64_dir),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ProfileError::EmptyField(*field));
        }

        self.ide_version
            .parse::<InstanceVersion>()
            .map_err(|source| ProfileError::InvalidIdeVersion {
                version: self.ide_version.clone(),
                source,
            })?;

        Ok(())
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        assert_eq!(ToolProfile::default().validate(), Ok(()));
        assert_eq!(ToolProfile::default().compiled_major(), Some(15));
    }

    #[test]
    fn exe_names_prefer_current_flavor() {
        let profile = ToolProfile::msbuild().with_flavor(HostFlavor::Managed);
        assert_eq!(profile.exe_name(), "MSBuild.dll");
        assert_eq!(profile.exe_names(), ["MSBuild.dll".to_string(), "MSBuild.exe".to_string()]);
    }

    #[test]
    fn recognizes_tool_and_task_host_with_either_extension() {
        let profile = ToolProfile::msbuild();
        assert!(profile.is_tool_executable(Path::new("msbuild.exe")));
        assert!(profile.is_tool_executable(Path::new("MSBuild.dll")));
        assert!(profile.is_tool_executable(Path::new("MSBuildTaskHost.exe")));
        assert!(!profile.is_tool_executable(Path::new("MSBuild.config")));
        assert!(!profile.is_tool_executable(Path::new("foo.exe")));
    }

    #[test]
    fn ide_tool_exe_follows_layout() {
        let exe = ToolProfile::msbuild()
            .with_flavor(HostFlavor::Native)
            .ide_tool_exe(Path::new("vs"));
        assert_eq!(
            exe,
            Path::new("vs").join("MSBuild").join("15.0").join("Bin").join("MSBuild.exe")
        );
    }

    #[test]
    fn validate_rejects_broken_profiles() {
        assert_eq!(
            ToolProfile::msbuild().with_exe_stem(" ").validate(),
            Err(ProfileError::EmptyExecutableStem)
        );
        assert_eq!(
            ToolProfile::msbuild().with_tools_version("").validate(),
            Err(ProfileError::EmptyField("tools_version"))
        );
        assert!(matches!(
            ToolProfile::msbuild().with_ide_version("next").validate(),
            Err(ProfileError::InvalidIdeVersion { .. })
        ));
    }
}
