//! CLI-specific error types and exit codes.

use buildenv_core::CatalogError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The `--instances` file could not be used.
    #[error("Instance catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// IO error writing output.
    #[error("IO error: {0}")]
    Io(String),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 64-78: Specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Catalog(_) => 65,       // EX_DATAERR
            Self::Io(_) => 74,            // EX_IOERR
            Self::Serialization(_) => 70, // EX_SOFTWARE
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn catalog_errors_are_data_errors() {
        let err = CliError::from(CatalogError::Read {
            path: PathBuf::from("vs.json"),
            reason: "not found".to_string(),
        });
        assert_eq!(err.exit_code(), 65);
        assert!(err.to_string().contains("vs.json"));
    }

    #[test]
    fn io_errors_map_to_ioerr() {
        let err = CliError::from(std::io::Error::other("broken pipe"));
        assert_eq!(err.exit_code(), 74);
    }
}
