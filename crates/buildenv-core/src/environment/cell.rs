//! Memo slot for a resolved [`BuildEnvironment`].

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{BuildEnvironment, ResetError};
use crate::probes::Probes;
use crate::resolver::resolve;

/// Holds at most one snapshot. Resolution runs under the write lock, so
/// concurrent first readers resolve once and share the result.
///
/// The slot only ever holds a complete snapshot, so a poisoned lock is
/// still safe to read.
#[derive(Debug, Default)]
pub struct EnvironmentCell {
    slot: RwLock<Option<Arc<BuildEnvironment>>>,
}

impl EnvironmentCell {
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// The cached snapshot, without resolving.
    pub fn get(&self) -> Option<Arc<BuildEnvironment>> {
        self.read().clone()
    }

    /// The cached snapshot, resolving with `probes()` if the slot is empty.
    pub fn get_or_resolve(&self, probes: impl FnOnce() -> Probes) -> Arc<BuildEnvironment> {
        if let Some(env) = self.read().as_ref() {
            return Arc::clone(env);
        }

        let mut slot = self.write();
        if let Some(env) = slot.as_ref() {
            return Arc::clone(env);
        }

        let env = Arc::new(resolve(&probes()));
        *slot = Some(Arc::clone(&env));
        env
    }

    /// Resolve against `probes` now, or clear the slot when `None`.
    pub fn reset(&self, probes: Option<Probes>) -> Result<(), ResetError> {
        let Some(probes) = probes else {
            tracing::debug!("Build environment cleared");
            *self.write() = None;
            return Ok(());
        };

        probes.profile.validate()?;
        let env = Arc::new(resolve(&probes));
        *self.write() = Some(env);
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Arc<BuildEnvironment>>> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Arc<BuildEnvironment>>> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::BuildEnvironmentMode;
    use crate::instances::MockInstanceLocator;
    use crate::probes::FixedHost;
    use crate::profile::{ProfileError, ToolProfile};

    #[test]
    fn repeated_reads_share_one_snapshot() {
        let cell = EnvironmentCell::new();
        assert!(cell.get().is_none());

        let first = cell.get_or_resolve(Probes::empty);
        let second = cell.get_or_resolve(|| panic!("resolved twice"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.mode(), BuildEnvironmentMode::None);
    }

    #[test]
    fn concurrent_first_access_resolves_once() {
        let mut locator = MockInstanceLocator::new();
        locator.expect_instances().times(1).returning(Vec::new);
        let probes = std::sync::Mutex::new(Some(Probes::empty().with_instances(locator)));

        let cell = EnvironmentCell::new();
        let snapshots: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        cell.get_or_resolve(|| probes.lock().unwrap().take().unwrap())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(snapshots.iter().all(|env| Arc::ptr_eq(env, &snapshots[0])));
    }

    #[test]
    fn reset_with_probes_recomputes_immediately() {
        let cell = EnvironmentCell::new();
        let before = cell.get_or_resolve(Probes::empty);

        let host = FixedHost::new().with_base_directory(std::env::temp_dir());
        cell.reset(Some(Probes::empty().with_host(host))).unwrap();

        let after = cell.get().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(
            after.current_tool_directory(),
            crate::paths::normalize(&std::env::temp_dir())
        );
    }

    #[test]
    fn reset_without_probes_clears() {
        let cell = EnvironmentCell::new();
        cell.get_or_resolve(Probes::empty);
        cell.reset(None).unwrap();
        assert!(cell.get().is_none());
    }

    #[test]
    fn reset_rejects_invalid_profile_and_keeps_snapshot() {
        let cell = EnvironmentCell::new();
        let before = cell.get_or_resolve(Probes::empty);

        let probes = Probes::empty().with_profile(ToolProfile::msbuild().with_exe_stem(""));
        assert_eq!(
            cell.reset(Some(probes)),
            Err(ResetError::InvalidProfile(ProfileError::EmptyExecutableStem))
        );
        assert!(Arc::ptr_eq(&before, &cell.get().unwrap()));
    }
}
