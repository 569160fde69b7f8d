//! Error types for configuration operations.
//!
//! Parse and validation errors carry the file they came from when the
//! configuration was loaded from disk, so CLI messages can name it.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::validation::ValidationError;

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Reading a configuration file.
    Read,
    /// Writing a configuration file.
    Write,
    /// Creating the directory that holds it.
    CreateDir,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::CreateDir => "create directory",
        })
    }
}

fn location(path: Option<&Path>) -> String {
    path.map(|p| format!("{}: ", p.display())).unwrap_or_default()
}

/// Errors from loading, validating or saving an [`AnalysisConfig`](crate::AnalysisConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file or directory could not be accessed.
    #[error("cannot {op} '{}': {source}", .path.display())]
    Io {
        /// What was being done.
        op: FileOp,
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML for a configuration.
    #[error("{}invalid TOML: {source}", location(.path.as_deref()))]
    Parse {
        /// Source file, if the document was read from disk.
        path: Option<PathBuf>,
        /// Decoder error.
        #[source]
        source: toml::de::Error,
    },

    /// The document parsed but holds out-of-range parameters.
    #[error("{}invalid configuration: {source}", location(.path.as_deref()))]
    Invalid {
        /// Source file, if the document was read from disk.
        path: Option<PathBuf>,
        /// Every violated constraint.
        #[source]
        source: ValidationError,
    },

    /// The configuration could not be encoded as TOML.
    #[error("cannot encode configuration: {0}")]
    Encode(#[from] toml::ser::Error),
}

impl From<toml::de::Error> for ConfigError {
    fn from(source: toml::de::Error) -> Self {
        ConfigError::Parse { path: None, source }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(source: ValidationError) -> Self {
        ConfigError::Invalid { path: None, source }
    }
}

impl ConfigError {
    /// Filesystem error on `path`.
    pub fn io(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Attributes a parse or validation error to `file`.
    ///
    /// Errors that already name a path are returned unchanged.
    pub fn in_file(self, file: &Path) -> Self {
        match self {
            ConfigError::Parse { path: None, source } => ConfigError::Parse {
                path: Some(file.to_path_buf()),
                source,
            },
            ConfigError::Invalid { path: None, source } => ConfigError::Invalid {
                path: Some(file.to_path_buf()),
                source,
            },
            other => other,
        }
    }

    /// File or directory the error concerns, if known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Io { path, .. } => Some(path),
            ConfigError::Parse { path, .. } | ConfigError::Invalid { path, .. } => path.as_deref(),
            ConfigError::Encode(_) => None,
        }
    }

    /// The validation failures, for an [`Invalid`](ConfigError::Invalid) error.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            ConfigError::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}
