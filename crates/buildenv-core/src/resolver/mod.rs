//! Build environment resolution.
//!
//! Resolution order for the tool executable (earliest wins):
//! 1. `MSBUILD_EXE_PATH`, if the file exists
//! 2. Command-line argument zero, if it names an existing tool executable
//! 3. The running process image, or a tool executable beside it
//! 4. The application base directory joined with the executable name
//!
//! IDE evidence, each candidate verified against the installed instances:
//! 1. The executable sits in `<root>/MSBuild/15.0/Bin[/amd64]`
//! 2. A developer console (`VSINSTALLDIR`, `VisualStudioVersion`)
//! 3. An installed instance enclosing the tool, or any usable one if no tool was found
//! 4. Argument zero is an IDE host process (`devenv`)
//!
//! Once an executable is located, evidence 2 to 4 only counts for a root that
//! contains it.
//!
//! Verified IDE evidence gives [`BuildEnvironmentMode::VisualStudio`], a located
//! executable alone gives `Standalone`, and anything else `None`.
//!
//! [`BuildEnvironmentMode::VisualStudio`]: crate::BuildEnvironmentMode::VisualStudio

mod evidence;
mod layout;
mod sources;

use std::path::{Path, PathBuf};

pub use sources::CandidateSource;

pub(crate) use layout::ToolsLayout;

use evidence::IdeEvidence;
use layout::tools_layout;
use sources::{Located, base_directory, locate_tool, raw_fallback};

use crate::environment::BuildEnvironment;
use crate::paths::{file_stem_starts_with, normalize, paths_equal};
use crate::probes::Probes;

/// Everything [`BuildEnvironment`] is derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub exe: PathBuf,
    pub layout: ToolsLayout,
    pub ide_root: Option<PathBuf>,
    pub located: bool,
    pub running_tests: bool,
    pub source: Option<CandidateSource>,
}

/// Resolve the build environment from `probes`.
///
/// Never fails: missing evidence at worst yields
/// [`BuildEnvironmentMode::None`](crate::BuildEnvironmentMode::None) with
/// paths under the application base directory.
pub fn resolve(probes: &Probes) -> BuildEnvironment {
    let resolution = resolve_parts(probes);
    let env = BuildEnvironment::from_resolution(resolution, &probes.profile);
    tracing::info!(
        mode = %env.mode(),
        exe = %env.current_tool_exe_path().display(),
        source = ?env.source(),
        "Build environment resolved"
    );
    env
}

fn resolve_parts(probes: &Probes) -> Resolution {
    let profile = &probes.profile;
    let fs = probes.fs.as_ref();
    let evidence = IdeEvidence::new(probes);
    let running_tests = running_tests(probes);
    let located = locate_tool(probes);

    if let Some(found) = &located {
        if let Some(root) = evidence.from_layout(found) {
            return Resolution {
                layout: tools_layout(&found.path, true, profile, fs),
                exe: found.path.clone(),
                ide_root: Some(root),
                located: true,
                running_tests,
                source: Some(found.source),
            };
        }
    }

    let located_exe = located.as_ref().map(|found| found.path.as_path());
    if let Some((evidence_source, root)) = evidence.first_accepted(located_exe) {
        tracing::debug!(source = %evidence_source, root = %root.display(), "IDE evidence accepted");
        let (exe, source) = match located {
            Some(Located { path, source }) => (path, source),
            None => (profile.ide_tool_exe(&root), evidence_source),
        };
        return Resolution {
            layout: tools_layout(&exe, true, profile, fs),
            exe,
            ide_root: Some(root),
            located: true,
            running_tests,
            source: Some(source),
        };
    }

    if let Some(found) = located {
        return Resolution {
            layout: tools_layout(&found.path, false, profile, fs),
            exe: found.path,
            ide_root: None,
            located: true,
            running_tests,
            source: Some(found.source),
        };
    }

    let exe = raw_fallback(probes).unwrap_or_else(|| {
        let base = base_directory(probes).unwrap_or_else(|| normalize(Path::new(".")));
        base.join(profile.exe_name())
    });
    tracing::debug!(exe = %exe.display(), "No tool executable located");
    Resolution {
        layout: tools_layout(&exe, false, profile, fs),
        exe,
        ide_root: None,
        located: false,
        running_tests,
        source: None,
    }
}

/// True when the hosting process is a known test runner.
fn running_tests(probes: &Probes) -> bool {
    probes
        .host
        .entry_process()
        .is_some_and(|process| file_stem_starts_with(&process, &probes.profile.test_runners))
}

fn is_within(path: &Path, root: &Path) -> bool {
    path.ancestors().any(|ancestor| paths_equal(ancestor, root))
}
