//! Environment provider trait for testable resolution.

use std::collections::HashMap;
use std::ffi::OsString;

/// Trait for accessing environment variables (injectable for testing).
pub trait EnvProvider: Send + Sync {
    /// Get an environment variable.
    fn get(&self, key: &str) -> Option<OsString>;
}

/// Production environment provider that reads from the actual process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// Environment provider with predefined variables. Nothing else is visible.
#[derive(Debug, Default, Clone)]
pub struct FixedEnv {
    vars: HashMap<String, OsString>,
}

impl FixedEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl EnvProvider for FixedEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_env_only_sees_its_own_vars() {
        let env = FixedEnv::new().with_var("MSBUILD_EXE_PATH", "/opt/MSBuild.exe");
        assert_eq!(env.get("MSBUILD_EXE_PATH"), Some(OsString::from("/opt/MSBuild.exe")));
        assert_eq!(env.get("PATH"), None);
    }
}
