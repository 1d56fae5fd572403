//! Migrator configuration

use std::path::{Path, PathBuf};

/// Conventional location of the EIP corpus, relative to the project root
pub const DEFAULT_DATA_DIR: &str = "src/data/eips";

/// Extension of migratable documents (without dot)
pub const DOCUMENT_EXTENSION: &str = "json";

/// Settings for one migration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratorConfig {
    /// Directory holding the EIP documents (scanned non-recursively)
    pub data_dir: PathBuf,
    /// Compute migrations without writing anything
    pub dry_run: bool,
}

impl MigratorConfig {
    /// Config for a specific data directory
    #[inline]
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            dry_run: false,
        }
    }

    /// Set dry-run mode
    #[inline]
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Data directory
    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
