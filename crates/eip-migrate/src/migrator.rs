//! Directory migration runner
//!
//! Lists the `.json` documents directly inside the data directory, migrates
//! them one at a time in name order and folds every outcome into a
//! [`Summary`]. A file that cannot be read, parsed or written is logged and
//! counted as unchanged; only directory-level failures stop the run.

use crate::config::{MigratorConfig, DOCUMENT_EXTENSION};
use crate::error::{MigrateError, MigrateResult};
use crate::store::{DocumentStore, FsStore};
use crate::summary::Summary;
use eip_status::{migrate_document, EntryReport};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of processing one file
#[derive(Debug)]
pub enum FileOutcome {
    /// Document rewritten (or would be, in a dry run)
    Migrated {
        /// File name
        name: String,
        /// Entry-level breakdown
        report: EntryReport,
    },
    /// Document needed no change
    Unchanged {
        /// File name
        name: String,
    },
    /// Read, parse or write failed; on-disk state untouched
    Failed {
        /// File name
        name: String,
        /// Cause
        error: MigrateError,
    },
}

impl FileOutcome {
    /// File name this outcome is about
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Migrated { name, .. } | Self::Unchanged { name } | Self::Failed { name, .. } => {
                name
            }
        }
    }

    /// Whether the file was (or would be) rewritten
    #[inline]
    #[must_use]
    pub fn is_migrated(&self) -> bool {
        matches!(self, Self::Migrated { .. })
    }
}

/// Hooks for reporting progress while a run is in flight
pub trait RunObserver {
    /// Called once with the sorted file list, before any file is touched
    fn discovered(&mut self, _files: &[PathBuf]) {}

    /// Called after each file
    fn file_done(&mut self, _outcome: &FileOutcome) {}
}

impl RunObserver for () {}

/// Sequential, single-threaded migration runner
///
/// Documents go through a [`DocumentStore`]; [`FsStore`] by default.
#[derive(Debug, Clone)]
pub struct Migrator<S = FsStore> {
    config: MigratorConfig,
    store: S,
}

impl Migrator {
    /// Create runner over the filesystem
    #[inline]
    #[must_use]
    pub fn new(config: MigratorConfig) -> Self {
        Self::with_store(config, FsStore)
    }
}

impl<S: DocumentStore> Migrator<S> {
    /// Create runner over a custom store
    #[inline]
    #[must_use]
    pub fn with_store(config: MigratorConfig, store: S) -> Self {
        Self { config, store }
    }

    /// Runner configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MigratorConfig {
        &self.config
    }

    /// Sorted list of documents in the data directory
    ///
    /// # Errors
    /// - `MigrateError::MissingDirectory` if the directory does not exist
    /// - `MigrateError::ReadDir` if it cannot be listed
    pub fn discover(&self) -> MigrateResult<Vec<PathBuf>> {
        discover_documents(self.config.data_dir())
    }

    /// Migrate a single file
    ///
    /// Never fails; problems come back as [`FileOutcome::Failed`].
    pub fn migrate_file(&self, path: &Path) -> FileOutcome {
        let name = file_name(path);
        match self.try_migrate_file(path) {
            Ok(Some(report)) => FileOutcome::Migrated { name, report },
            Ok(None) => FileOutcome::Unchanged { name },
            Err(error) => FileOutcome::Failed { name, error },
        }
    }

    fn try_migrate_file(&self, path: &Path) -> MigrateResult<Option<EntryReport>> {
        let raw = self.store.read(path).map_err(|e| MigrateError::read(path, e))?;
        let migration = migrate_document(&raw).map_err(|e| MigrateError::parse(path, e))?;

        if !migration.changed {
            return Ok(None);
        }

        if self.config.dry_run {
            tracing::debug!(file = %path.display(), "dry run, not writing");
        } else {
            self.store
                .write(path, &migration.bytes)
                .map_err(|e| MigrateError::write(path, e))?;
        }
        Ok(Some(migration.report))
    }

    /// Migrate every document in the data directory
    ///
    /// # Errors
    /// Only the directory-level errors of [`Migrator::discover`].
    pub fn run(&self) -> MigrateResult<Summary> {
        self.run_with(&mut ())
    }

    /// Like [`Migrator::run`], reporting progress to `observer`
    ///
    /// # Errors
    /// Only the directory-level errors of [`Migrator::discover`].
    pub fn run_with<O>(&self, observer: &mut O) -> MigrateResult<Summary>
    where
        O: RunObserver + ?Sized,
    {
        let files = self.discover()?;
        tracing::info!(
            dir = %self.config.data_dir().display(),
            files = files.len(),
            dry_run = self.config.dry_run,
            "Found EIP documents"
        );
        observer.discovered(&files);

        let mut summary = Summary::new(self.config.dry_run);
        for path in &files {
            let outcome = self.migrate_file(path);
            match &outcome {
                FileOutcome::Migrated { name, report } => tracing::debug!(
                    file = %name,
                    promoted = report.promoted,
                    dropped = report.dropped,
                    "Migrated"
                ),
                FileOutcome::Unchanged { name } => tracing::debug!(file = %name, "Unchanged"),
                FileOutcome::Failed { name, error } => {
                    tracing::warn!(file = %name, error = %error, "Skipping file");
                }
            }
            summary.record(&outcome);
            observer.file_done(&outcome);
        }

        tracing::info!(
            total = summary.total,
            migrated = summary.migrated,
            unchanged = summary.unchanged,
            failed = summary.failed_files.len(),
            "Migration finished"
        );
        Ok(summary)
    }
}

/// Migrate every document in `config.data_dir`
///
/// # Errors
/// `MigrateError::MissingDirectory` or `MigrateError::ReadDir`.
pub fn run(config: MigratorConfig) -> MigrateResult<Summary> {
    Migrator::new(config).run()
}

/// Regular `*.json` files directly inside `dir`, dot-files included, sorted by name
///
/// # Errors
/// - `MigrateError::MissingDirectory` if `dir` is not an existing directory
/// - `MigrateError::ReadDir` if listing fails
pub fn discover_documents(dir: &Path) -> MigrateResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MigrateError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| MigrateError::read_dir(dir, e))? {
        let path = entry.map_err(|e| MigrateError::read_dir(dir, e))?.path();
        if is_document(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_document(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    // `*.json` glob semantics: ".json" itself and dot-files match too
    let json = name
        .as_encoded_bytes()
        .strip_suffix(DOCUMENT_EXTENSION.as_bytes())
        .is_some_and(|stem| stem.ends_with(b"."));
    json && path.is_file()
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}
