//! Process identity probes.

use std::path::PathBuf;

/// Read-only view of how the current process was started.
#[cfg_attr(test, mockall::automock)]
pub trait HostProbe: Send + Sync {
    /// Command-line argument zero, as given by the launcher.
    fn entry_process(&self) -> Option<PathBuf>;

    /// Path of the image the process is running.
    fn executing_image(&self) -> Option<PathBuf>;

    /// Directory the application was loaded from.
    fn base_directory(&self) -> Option<PathBuf>;
}

/// Probes the real process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl HostProbe for SystemHost {
    fn entry_process(&self) -> Option<PathBuf> {
        std::env::args_os()
            .next()
            .filter(|arg| !arg.is_empty())
            .map(PathBuf::from)
    }

    fn executing_image(&self) -> Option<PathBuf> {
        std::env::current_exe().ok()
    }

    fn base_directory(&self) -> Option<PathBuf> {
        self.executing_image()
            .and_then(|exe| exe.parent().map(PathBuf::from))
    }
}

/// Host probe answering from fixed values.
#[derive(Debug, Default, Clone)]
pub struct FixedHost {
    entry_process: Option<PathBuf>,
    executing_image: Option<PathBuf>,
    base_directory: Option<PathBuf>,
}

impl FixedHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry_process(mut self, path: impl Into<PathBuf>) -> Self {
        self.entry_process = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_executing_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.executing_image = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_base_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_directory = Some(path.into());
        self
    }
}

impl HostProbe for FixedHost {
    fn entry_process(&self) -> Option<PathBuf> {
        self.entry_process.clone()
    }

    fn executing_image(&self) -> Option<PathBuf> {
        self.executing_image.clone()
    }

    fn base_directory(&self) -> Option<PathBuf> {
        self.base_directory.clone()
    }
}
