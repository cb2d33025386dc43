use thiserror::Error;

use crate::profile::ProfileError;

/// Errors from [`BuildEnvironment::reset_instance_for_tests`](super::BuildEnvironment::reset_instance_for_tests).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResetError {
    #[error("Cannot reset build environment: {0}")]
    InvalidProfile(#[from] ProfileError),
}
