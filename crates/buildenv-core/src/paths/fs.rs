//! Filesystem provider trait for testable existence checks.

use std::path::Path;

/// Trait for filesystem queries (injectable for testing).
pub trait FsProvider: Send + Sync {
    /// True if `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// True if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Production filesystem provider backed by `std::fs` metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFs;

impl FsProvider for SystemFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// In-memory filesystem for unit tests. Every ancestor of a registered file
/// counts as a directory.
#[cfg(test)]
#[derive(Default)]
pub struct MockFs {
    files: std::collections::HashSet<std::path::PathBuf>,
    dirs: std::collections::HashSet<std::path::PathBuf>,
}

#[cfg(test)]
impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        for ancestor in path.ancestors().skip(1) {
            if !ancestor.as_os_str().is_empty() {
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
        self.files.insert(path);
        self
    }

    #[must_use]
    pub fn with_dir(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }
}

#[cfg(test)]
impl FsProvider for MockFs {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }
}
