//! Directory layout rules: 32/64-bit tool directories and IDE roots.

use std::path::{Path, PathBuf};

use crate::paths::{FsProvider, file_name_eq, name_eq};
use crate::profile::ToolProfile;

/// The 32-bit and 64-bit tool directories. Equal when there is no 64-bit variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ToolsLayout {
    pub dir32: PathBuf,
    pub dir64: PathBuf,
}

impl ToolsLayout {
    fn single(dir: &Path) -> Self {
        Self {
            dir32: dir.to_path_buf(),
            dir64: dir.to_path_buf(),
        }
    }
}

/// Work out both tool directories from the executable's location.
///
/// With `assume_complete` (an IDE installation) the sibling executable is not
/// checked for.
pub(crate) fn tools_layout(
    exe: &Path,
    assume_complete: bool,
    profile: &ToolProfile,
    fs: &dyn FsProvider,
) -> ToolsLayout {
    let (Some(dir), Some(name)) = (exe.parent(), exe.file_name()) else {
        return ToolsLayout::single(exe);
    };
    let has_variant = |candidate: &Path| assume_complete || fs.is_file(candidate);

    if file_name_eq(dir, &profile.arch64_dir) {
        if let Some(parent) = dir.parent() {
            if has_variant(&parent.join(name)) {
                return ToolsLayout {
                    dir32: parent.to_path_buf(),
                    dir64: dir.to_path_buf(),
                };
            }
        }
        return ToolsLayout::single(dir);
    }

    let dir64 = dir.join(&profile.arch64_dir);
    if has_variant(&dir64.join(name)) {
        return ToolsLayout {
            dir32: dir.to_path_buf(),
            dir64,
        };
    }
    ToolsLayout::single(dir)
}

/// Strip `<product>/<tools version>/<bin>[/<arch64>]` from `tool_dir`.
///
/// Returns the candidate IDE root; it still has to be verified against the
/// installed instances.
pub(crate) fn ide_root_from_layout(
    tool_dir: &Path,
    profile: &ToolProfile,
    allow_legacy: bool,
) -> Option<PathBuf> {
    let bin = if file_name_eq(tool_dir, &profile.arch64_dir) {
        tool_dir.parent()?
    } else {
        tool_dir
    };
    if !file_name_eq(bin, &profile.bin_dir) {
        return None;
    }

    let version_dir = bin.parent()?;
    let version = version_dir.file_name()?;
    let version_ok = name_eq(version, &profile.tools_version)
        || (allow_legacy && is_legacy_version(&version.to_string_lossy()));
    if !version_ok {
        return None;
    }

    let product = version_dir.parent()?;
    if !file_name_eq(product, &profile.product_dir) {
        return None;
    }

    product
        .parent()
        .filter(|root| !root.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// `<N>.0`, the per-version tools directories older installs used.
fn is_legacy_version(name: &str) -> bool {
    name.strip_suffix(".0")
        .is_some_and(|major| !major.is_empty() && major.bytes().all(|b| b.is_ascii_digit()))
}
