//! The resolved build environment and its process-wide memo.
//!
//! # Lifecycle
//!
//! [`BuildEnvironment::instance`] resolves on first access with
//! [`Probes::system`] and returns the same [`Arc`] afterwards.
//! [`BuildEnvironment::reset_instance_for_tests`] is the only way to change it.

mod cell;
mod error;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

pub use cell::EnvironmentCell;
pub use error::ResetError;

use crate::paths::append_suffix;
use crate::probes::Probes;
use crate::profile::ToolProfile;
use crate::resolver::{CandidateSource, Resolution};

static INSTANCE: EnvironmentCell = EnvironmentCell::new();

/// How the tool is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildEnvironmentMode {
    /// No usable evidence; paths are best-effort.
    None,
    /// A tool executable was found outside any IDE installation.
    Standalone,
    /// Running from, or alongside, a verified IDE installation.
    VisualStudio,
}

impl BuildEnvironmentMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Standalone => "standalone",
            Self::VisualStudio => "visual-studio",
        }
    }
}

impl fmt::Display for BuildEnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable result of one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEnvironment {
    mode: BuildEnvironmentMode,
    current_tool_exe_path: PathBuf,
    current_tool_directory: PathBuf,
    current_tool_config_file: PathBuf,
    tools_directory32: PathBuf,
    tools_directory64: PathBuf,
    ide_install_root: Option<PathBuf>,
    running_in_ide: bool,
    running_tests: bool,
    extensions_path: PathBuf,
    source: Option<CandidateSource>,
}

impl BuildEnvironment {
    /// The process-wide snapshot, resolving it on first access.
    pub fn instance() -> Arc<Self> {
        INSTANCE.get_or_resolve(Probes::system)
    }

    /// Replace the process-wide snapshot. Test harnesses only.
    ///
    /// `Some(probes)` resolves against them immediately. `None` clears the
    /// memo so the next [`instance`](Self::instance) resolves against the
    /// real process again. Not safe against concurrent readers.
    pub fn reset_instance_for_tests(probes: Option<Probes>) -> Result<(), ResetError> {
        INSTANCE.reset(probes)
    }

    pub(crate) fn from_resolution(resolution: Resolution, profile: &ToolProfile) -> Self {
        let Resolution {
            exe,
            layout,
            ide_root,
            located,
            running_tests,
            source,
        } = resolution;

        let mode = match (&ide_root, located) {
            (Some(_), _) => BuildEnvironmentMode::VisualStudio,
            (None, true) => BuildEnvironmentMode::Standalone,
            (None, false) => BuildEnvironmentMode::None,
        };
        let current_tool_directory = exe
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(exe.as_path())
            .to_path_buf();
        let extensions_path = ide_root.as_ref().map_or_else(
            || layout.dir32.clone(),
            |root| root.join(&profile.product_dir),
        );

        Self {
            mode,
            current_tool_config_file: append_suffix(&exe, &profile.config_suffix),
            current_tool_exe_path: exe,
            current_tool_directory,
            tools_directory32: layout.dir32,
            tools_directory64: layout.dir64,
            running_in_ide: ide_root.is_some(),
            ide_install_root: ide_root,
            running_tests,
            extensions_path,
            source,
        }
    }

    pub const fn mode(&self) -> BuildEnvironmentMode {
        self.mode
    }

    pub fn current_tool_exe_path(&self) -> &Path {
        &self.current_tool_exe_path
    }

    pub fn current_tool_directory(&self) -> &Path {
        &self.current_tool_directory
    }

    pub fn current_tool_config_file(&self) -> &Path {
        &self.current_tool_config_file
    }

    pub fn tools_directory32(&self) -> &Path {
        &self.tools_directory32
    }

    /// Same as [`tools_directory32`](Self::tools_directory32) when there is no 64-bit variant.
    pub fn tools_directory64(&self) -> &Path {
        &self.tools_directory64
    }

    /// `Some` exactly in [`BuildEnvironmentMode::VisualStudio`].
    pub fn ide_install_root(&self) -> Option<&Path> {
        self.ide_install_root.as_deref()
    }

    pub const fn running_in_ide(&self) -> bool {
        self.running_in_ide
    }

    /// Hosted by a known test runner. Independent of [`mode`](Self::mode).
    pub const fn running_tests(&self) -> bool {
        self.running_tests
    }

    pub fn extensions_path(&self) -> &Path {
        &self.extensions_path
    }

    /// What produced the executable path; `None` for fallback snapshots.
    pub const fn source(&self) -> Option<CandidateSource> {
        self.source
    }
}

impl fmt::Display for BuildEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mode = {}", self.mode)?;
        writeln!(
            f,
            "current_tool_exe_path = {}",
            self.current_tool_exe_path.display()
        )?;
        writeln!(
            f,
            "current_tool_directory = {}",
            self.current_tool_directory.display()
        )?;
        writeln!(
            f,
            "current_tool_config_file = {}",
            self.current_tool_config_file.display()
        )?;
        writeln!(f, "tools_directory32 = {}", self.tools_directory32.display())?;
        writeln!(f, "tools_directory64 = {}", self.tools_directory64.display())?;
        match &self.ide_install_root {
            Some(root) => writeln!(f, "ide_install_root = {}", root.display())?,
            None => writeln!(f, "ide_install_root = (none)")?,
        }
        writeln!(f, "running_in_ide = {}", self.running_in_ide)?;
        writeln!(f, "running_tests = {}", self.running_tests)?;
        writeln!(f, "extensions_path = {}", self.extensions_path.display())?;
        match self.source {
            Some(source) if source.is_ide_evidence() => {
                write!(f, "source = {source} (IDE layout default)")
            }
            Some(source) => write!(f, "source = {source}"),
            None => write!(f, "source = (fallback)"),
        }
    }
}
