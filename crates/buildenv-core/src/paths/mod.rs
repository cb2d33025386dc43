//! Path utilities for build-environment resolution.
//!
//! Every comparison the resolver makes goes through this module:
//! - Paths are made absolute and lexically normal before use
//! - Comparisons ignore case (build tools commonly live on case-insensitive
//!   filesystems) and trailing separators
//! - Existence checks go through [`FsProvider`] so resolution can be tested
//!   without touching disk

mod fs;
mod normalize;

pub use fs::{FsProvider, SystemFs};
pub use normalize::{
    append_suffix, file_name_eq, file_stem_in, file_stem_starts_with, folder_above, name_eq,
    normalize, paths_equal,
};

#[cfg(test)]
pub use fs::MockFs;
