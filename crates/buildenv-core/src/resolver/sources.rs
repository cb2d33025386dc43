//! Candidate sources for the tool executable.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::paths::normalize;
use crate::probes::Probes;

/// Where the snapshot's executable path came from.
///
/// The first four variants form the location chain, tried in declaration
/// order. The rest name the IDE evidence that produced the path when no
/// executable was located directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateSource {
    /// The profile's executable-path variable (`MSBUILD_EXE_PATH`).
    EnvironmentVariable,
    /// Command-line argument zero.
    CommandLine,
    /// The running process image, or a tool executable beside it.
    ProcessImage,
    /// The application base directory joined with the executable name.
    BaseDirectory,
    /// `VSINSTALLDIR` and `VisualStudioVersion` from a developer console.
    DeveloperConsole,
    /// An installed-instance record.
    InstanceCatalog,
    /// Argument zero names an IDE host process.
    IdeHostProcess,
}

impl CandidateSource {
    /// Location chain, highest priority first.
    pub const LOCATION_CHAIN: [Self; 4] = [
        Self::EnvironmentVariable,
        Self::CommandLine,
        Self::ProcessImage,
        Self::BaseDirectory,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnvironmentVariable => "environment-variable",
            Self::CommandLine => "command-line",
            Self::ProcessImage => "process-image",
            Self::BaseDirectory => "base-directory",
            Self::DeveloperConsole => "developer-console",
            Self::InstanceCatalog => "instance-catalog",
            Self::IdeHostProcess => "ide-host-process",
        }
    }

    pub const fn is_ide_evidence(self) -> bool {
        matches!(
            self,
            Self::DeveloperConsole | Self::InstanceCatalog | Self::IdeHostProcess
        )
    }

    /// Only an explicitly configured path may sit in a legacy `<N>.0` directory.
    pub(crate) const fn allows_legacy_layout(self) -> bool {
        matches!(self, Self::EnvironmentVariable)
    }

    /// An existing tool executable from this source, or `None` if the source is silent.
    pub(crate) fn try_locate(self, probes: &Probes) -> Option<PathBuf> {
        let fs = probes.fs.as_ref();
        let profile = &probes.profile;

        match self {
            Self::EnvironmentVariable => self.raw(probes).filter(|p| fs.is_file(p)),
            Self::CommandLine => self
                .raw(probes)
                .filter(|p| profile.is_tool_executable(p) && fs.is_file(p)),
            Self::ProcessImage => {
                let image = self.raw(probes)?;
                if profile.is_tool_executable(&image) && fs.is_file(&image) {
                    return Some(image);
                }
                image.parent().and_then(|dir| probe_dir(dir, probes))
            }
            Self::BaseDirectory => base_directory(probes).and_then(|dir| probe_dir(&dir, probes)),
            Self::DeveloperConsole | Self::InstanceCatalog | Self::IdeHostProcess => None,
        }
    }

    /// The unverified path this source reports, for the last-resort fallback.
    pub(crate) fn raw(self, probes: &Probes) -> Option<PathBuf> {
        let path = match self {
            Self::EnvironmentVariable => probes
                .env
                .get(&probes.profile.exe_path_variable)
                .map(PathBuf::from),
            Self::CommandLine => probes.host.entry_process(),
            Self::ProcessImage => probes.host.executing_image(),
            _ => None,
        };
        path.filter(|p| !p.as_os_str().is_empty())
            .map(|p| normalize(&p))
    }
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An existing tool executable and the source that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Located {
    pub path: PathBuf,
    pub source: CandidateSource,
}

/// Walk the location chain; the earliest source with an existing file wins.
pub(crate) fn locate_tool(probes: &Probes) -> Option<Located> {
    CandidateSource::LOCATION_CHAIN.iter().find_map(|&source| {
        let path = source.try_locate(probes)?;
        tracing::debug!(%source, path = %path.display(), "Located tool executable");
        Some(Located { path, source })
    })
}

/// First unverified path from the sources that name a file directly.
pub(crate) fn raw_fallback(probes: &Probes) -> Option<PathBuf> {
    [
        CandidateSource::EnvironmentVariable,
        CandidateSource::CommandLine,
        CandidateSource::ProcessImage,
    ]
    .iter()
    .find_map(|source| source.raw(probes))
}

/// The application base directory, normalized. Empty values count as unset.
pub(crate) fn base_directory(probes: &Probes) -> Option<PathBuf> {
    probes
        .host
        .base_directory()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| normalize(&dir))
}

fn probe_dir(dir: &Path, probes: &Probes) -> Option<PathBuf> {
    probes
        .profile
        .exe_names()
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| probes.fs.is_file(candidate))
}
