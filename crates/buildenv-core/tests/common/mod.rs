//! Common test utilities.
//!
//! On-disk tool layouts in temporary directories, removed on drop.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use buildenv_core::{HostFlavor, IdeInstance, InstanceVersion, ToolProfile};
use tempfile::TempDir;

pub const EXE: &str = "MSBuild.exe";
pub const DLL: &str = "MSBuild.dll";

/// Create an empty file and its parent directories.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}

/// The default profile pinned to the native flavor, whatever features are on.
pub fn profile() -> ToolProfile {
    ToolProfile::msbuild().with_flavor(HostFlavor::Native)
}

pub fn vs_instance(root: &Path, major: u32) -> IdeInstance {
    IdeInstance::new("VisualStudio", root, InstanceVersion::new(major, 0))
}

/// `<temp>/MSBuild/<exe>` with its config file.
pub struct StandaloneLayout {
    _temp: TempDir,
    pub root: PathBuf,
    pub build_dir: PathBuf,
    pub exe: PathBuf,
}

impl StandaloneLayout {
    pub fn new(exe_name: &str) -> Self {
        Self::build(exe_name, true, false)
    }

    /// Also writes `<temp>/MSBuild/amd64/<exe>`.
    pub fn with_amd64(exe_name: &str) -> Self {
        Self::build(exe_name, true, true)
    }

    /// Only the directory, no executable.
    pub fn empty() -> Self {
        Self::build(EXE, false, false)
    }

    fn build(exe_name: &str, write_files: bool, amd64: bool) -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().to_path_buf();
        let build_dir = root.join("MSBuild");
        let exe = build_dir.join(exe_name);

        fs::create_dir_all(&build_dir).unwrap();
        if write_files {
            touch(&exe);
            touch(&build_dir.join(format!("{exe_name}.config")));
            if amd64 {
                touch(&build_dir.join("amd64").join(exe_name));
            }
        }

        Self {
            _temp: temp,
            root,
            build_dir,
            exe,
        }
    }

    pub fn amd64_dir(&self) -> PathBuf {
        self.build_dir.join("amd64")
    }
}

/// A Visual Studio 2017 style install:
/// `<root>/MSBuild/15.0/Bin[/amd64]/MSBuild.exe` and `<root>/Common7/IDE/devenv.exe`.
pub struct VsLayout {
    _temp: TempDir,
    pub root: PathBuf,
    pub build_dir: PathBuf,
    pub build_dir64: PathBuf,
    pub exe: PathBuf,
    pub exe64: PathBuf,
    pub devenv: PathBuf,
    pub blend: PathBuf,
}

impl VsLayout {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().to_path_buf();
        let build_dir = root.join("MSBuild").join("15.0").join("Bin");
        let build_dir64 = build_dir.join("amd64");
        let ide_dir = root.join("Common7").join("IDE");

        for dir in [&build_dir, &build_dir64] {
            touch(&dir.join(EXE));
            touch(&dir.join(format!("{EXE}.config")));
        }
        let devenv = ide_dir.join("devenv.exe");
        touch(&devenv);

        Self {
            _temp: temp,
            exe: build_dir.join(EXE),
            exe64: build_dir64.join(EXE),
            blend: ide_dir.join("blend.exe"),
            root,
            build_dir,
            build_dir64,
            devenv,
        }
    }
}
