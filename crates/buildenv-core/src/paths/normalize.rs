//! Lexical normalization and case-insensitive comparison.

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute and lexically normal.
///
/// Relative paths are resolved against the current directory. `.` is dropped,
/// `..` removes the preceding normal component, and trailing separators
/// disappear. An empty path names the current directory. The filesystem is
/// never consulted, so symlinks are kept as-is.
pub fn normalize(path: &Path) -> PathBuf {
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Compare two paths after normalization, ignoring case and trailing separators.
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    let (a, b) = (normalize(a), normalize(b));
    let mut left = a.components();
    let mut right = b.components();

    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(l), Some(r)) if name_eq(l.as_os_str(), r.as_os_str()) => {}
            _ => return false,
        }
    }
}

/// Case-insensitive comparison of a single path component.
pub fn name_eq(a: &OsStr, b: impl AsRef<OsStr>) -> bool {
    fold(a) == fold(b.as_ref())
}

/// True when the final component of `path` equals `name`, ignoring case.
pub fn file_name_eq(path: &Path, name: &str) -> bool {
    path.file_name().is_some_and(|n| name_eq(n, name))
}

/// True when the file stem of `path` equals one of `names`, ignoring case.
pub fn file_stem_in<S: AsRef<str>>(path: &Path, names: &[S]) -> bool {
    path.file_stem()
        .is_some_and(|stem| names.iter().any(|name| name_eq(stem, name.as_ref())))
}

/// True when the file stem of `path` starts with one of `prefixes`, ignoring case.
pub fn file_stem_starts_with<S: AsRef<str>>(path: &Path, prefixes: &[S]) -> bool {
    let Some(stem) = path.file_stem() else {
        return false;
    };
    let stem = fold(stem);
    prefixes
        .iter()
        .any(|prefix| stem.starts_with(&prefix.as_ref().to_lowercase()))
}

/// The directory `levels` steps above `path` (`1` is the parent).
pub fn folder_above(path: &Path, levels: usize) -> Option<PathBuf> {
    path.ancestors()
        .nth(levels)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// `path` with `suffix` appended to its final component (`a/tool.exe` → `a/tool.exe.config`).
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = OsString::from(path.as_os_str());
    raw.push(suffix);
    PathBuf::from(raw)
}

fn fold(value: &OsStr) -> String {
    value.to_string_lossy().to_lowercase()
}
