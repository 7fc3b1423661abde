//! Error types for the scriptflow runner.
//!
//! Discovery problems are fatal and always name the file that caused them.
//! Script failures are *not* errors: they are recorded as run outcomes and
//! the batch carries on.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for scriptflow operations.
#[derive(Debug, Error)]
pub enum ScriptflowError {
    /// Script discovery failed.
    #[error("{0}")]
    Discovery(#[from] DiscoveryError),

    /// The run configuration is invalid or could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal problems found while discovering scripts.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The scripts directory could not be listed.
    #[error("cannot read scripts directory {}: {source}", path.display())]
    Directory {
        /// Directory that was scanned.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The discovery settings are unusable.
    #[error("cannot scan {}: {source}", path.display())]
    Config {
        /// Directory that would have been scanned.
        path: PathBuf,
        /// The rejected setting.
        #[source]
        source: ConfigError,
    },

    /// A candidate script could not be read.
    #[error("cannot read script {}: {source}", path.display())]
    Read {
        /// Offending script.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The frontmatter block is not valid JSON or does not match the schema.
    #[error("invalid frontmatter in {}: {source}", path.display())]
    Parse {
        /// Offending script.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The frontmatter parsed but one of its fields is unusable.
    #[error("invalid frontmatter in {}: field `{field}`: {reason}", path.display())]
    Field {
        /// Offending script.
        path: PathBuf,
        /// Field name, dotted for nested outputs (e.g. `outputs[1].filename`).
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl DiscoveryError {
    /// Returns the path of the file or directory that caused the error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory { path, .. }
            | Self::Config { path, .. }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Field { path, .. } => path,
        }
    }
}

/// Errors raised while loading or validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A configuration value is not acceptable.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Field name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// A string could not be read as a boolean flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised boolean value {value:?} (expected one of true/false, yes/no, on/off, 1/0)")]
pub struct FlagParseError {
    /// The rejected input.
    pub value: String,
}

/// Result type alias for scriptflow operations.
pub type Result<T> = std::result::Result<T, ScriptflowError>;
