//! Test utilities for tests that touch process-wide state.

use std::sync::Mutex;

/// Shared lock to serialize tests that read or replace the global
/// [`BuildEnvironment`](crate::BuildEnvironment) snapshot.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());
