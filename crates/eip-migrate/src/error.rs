//! Error types for migration runs
//!
//! Only directory-level failures abort a run. Everything scoped to one file
//! is reported through [`FileOutcome::Failed`](crate::FileOutcome::Failed)
//! and the run moves on.

use eip_status::DocumentError;
use std::path::{Path, PathBuf};

/// Migration run error
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// Data directory does not exist
    #[error("missing EIP data directory: {0}")]
    MissingDirectory(PathBuf),

    /// Data directory could not be listed
    #[error("io error listing {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document could not be read
    #[error("error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON
    #[error("error parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// Migrated document could not be written back
    #[error("error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MigrateError {
    /// Create read error for path
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for path
    pub fn parse(path: impl Into<PathBuf>, source: DocumentError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Create write error for path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Create directory listing error for path
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }

    /// Whether the whole run must stop
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingDirectory(_) | Self::ReadDir { .. })
    }

    /// Path the error refers to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::MissingDirectory(path)
            | Self::ReadDir { path, .. }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Write { path, .. } => path,
        }
    }
}

/// Result type alias for migration runs
pub type MigrateResult<T> = Result<T, MigrateError>;
