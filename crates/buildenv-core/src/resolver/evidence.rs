//! Evidence that the tool runs inside an IDE installation.
//!
//! Every candidate root, whatever produced it, must be claimed by an installed
//! instance of the compiled major version before it counts.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use super::layout::ide_root_from_layout;
use super::is_within;
use super::sources::{CandidateSource, Located};
use crate::instances::IdeInstance;
use crate::paths::{file_stem_in, folder_above, normalize};
use crate::probes::Probes;
use crate::version::{InstanceVersion, VersionMatcher};

/// IDE evidence checks for one resolution. Instances are enumerated at most once.
pub(crate) struct IdeEvidence<'a> {
    probes: &'a Probes,
    matcher: Option<VersionMatcher>,
    instances: OnceCell<Vec<IdeInstance>>,
}

impl<'a> IdeEvidence<'a> {
    pub fn new(probes: &'a Probes) -> Self {
        Self {
            probes,
            matcher: probes.profile.version_matcher(),
            instances: OnceCell::new(),
        }
    }

    fn instances(&self) -> &[IdeInstance] {
        self.instances.get_or_init(|| self.probes.instances.instances())
    }

    /// `root`, normalized, if an installed instance of the right version claims it.
    pub fn verify(&self, root: &Path) -> Option<PathBuf> {
        let matcher = self.matcher?;
        let root = normalize(root);
        let instance = matcher.select(self.instances(), &root)?;
        tracing::debug!(
            instance = %instance.name,
            root = %root.display(),
            "IDE root accepted"
        );
        Some(root)
    }

    /// IDE root implied by where the tool executable sits.
    pub fn from_layout(&self, located: &Located) -> Option<PathBuf> {
        let dir = located.path.parent()?;
        let root = ide_root_from_layout(
            dir,
            &self.probes.profile,
            located.source.allows_legacy_layout(),
        )?;
        self.verify(&root)
    }

    /// Non-layout evidence, highest confidence first.
    ///
    /// With a located executable only roots enclosing it count; the located
    /// path is never traded for another IDE's copy.
    pub fn first_accepted(&self, exe: Option<&Path>) -> Option<(CandidateSource, PathBuf)> {
        let encloses_exe = |root: &PathBuf| {
            let enclosed = exe.is_none_or(|exe| is_within(exe, root));
            if !enclosed {
                tracing::debug!(root = %root.display(), "IDE root does not contain the located tool");
            }
            enclosed
        };
        let tool_dir = exe.and_then(Path::parent);

        self.developer_console()
            .filter(encloses_exe)
            .map(|root| (CandidateSource::DeveloperConsole, root))
            .or_else(|| {
                self.instance_catalog(tool_dir)
                    .filter(encloses_exe)
                    .map(|root| (CandidateSource::InstanceCatalog, root))
            })
            .or_else(|| {
                self.ide_host_process()
                    .filter(encloses_exe)
                    .map(|root| (CandidateSource::IdeHostProcess, root))
            })
    }

    /// `VSINSTALLDIR` plus a `VisualStudioVersion` of the compiled major.
    pub fn developer_console(&self) -> Option<PathBuf> {
        let profile = &self.probes.profile;
        let matcher = self.matcher?;

        let root = self
            .probes
            .env
            .get(&profile.ide_root_variable)
            .filter(|value| !value.is_empty())?;
        let version = self.probes.env.get(&profile.ide_version_variable)?;
        let version: InstanceVersion = version.to_str()?.parse().ok()?;
        if version.major != matcher.compiled_major() {
            tracing::debug!(%version, "Developer console is for another IDE version");
            return None;
        }

        let root = normalize(Path::new(&root));
        if !self.probes.fs.is_dir(&root) {
            return None;
        }
        self.verify(&root)
    }

    /// An installed instance enclosing the tool, or any usable one when no tool was found.
    pub fn instance_catalog(&self, tool_dir: Option<&Path>) -> Option<PathBuf> {
        if let Some(dir) = tool_dir {
            return dir.ancestors().skip(2).find_map(|ancestor| self.verify(ancestor));
        }

        let matcher = self.matcher?;
        self.instances()
            .iter()
            .find(|instance| {
                matcher.accepts_version(instance) && self.probes.fs.is_dir(&instance.root)
            })
            .map(|instance| normalize(&instance.root))
    }

    /// Argument zero is an IDE host process; its root sits a fixed depth above.
    ///
    /// Name-based, so the lowest-confidence evidence.
    pub fn ide_host_process(&self) -> Option<PathBuf> {
        let profile = &self.probes.profile;
        let process = normalize(&self.probes.host.entry_process()?);
        if !file_stem_in(&process, &profile.ide_host_processes) {
            return None;
        }
        let root = folder_above(&process, profile.ide_host_depth)?;
        self.verify(&root)
    }
}
