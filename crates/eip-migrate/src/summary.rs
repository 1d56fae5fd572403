//! Run summary

use crate::migrator::FileOutcome;
use eip_status::EntryReport;
use serde::Serialize;
use std::fmt;

/// Tally of one migration run
///
/// `total == migrated + unchanged` always holds; failed files count as
/// unchanged since nothing reached the disk for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Files considered
    pub total: usize,
    /// Files rewritten (or that would be, in a dry run)
    pub migrated: usize,
    /// Files left as they were, including failures
    pub unchanged: usize,
    /// Names of migrated files, in processing order
    pub migrated_files: Vec<String>,
    /// Names of files that could not be read, parsed or written
    pub failed_files: Vec<String>,
    /// Entry outcomes summed over migrated files
    pub entries: EntryReport,
    /// Whether writes were suppressed
    pub dry_run: bool,
}

impl Summary {
    /// Empty summary
    #[inline]
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Account for one processed file
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.total += 1;
        match outcome {
            FileOutcome::Migrated { name, report } => {
                self.migrated += 1;
                self.migrated_files.push(name.clone());
                self.entries.merge(report);
            }
            FileOutcome::Unchanged { .. } => self.unchanged += 1,
            FileOutcome::Failed { name, .. } => {
                self.unchanged += 1;
                self.failed_files.push(name.clone());
            }
        }
    }

    /// Whether any file failed
    #[inline]
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed_files.is_empty()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Migration Summary ---")?;
        if self.dry_run {
            writeln!(f, "(dry run, no files written)")?;
        }
        writeln!(f, "Total files: {}", self.total)?;
        writeln!(f, "Migrated: {}", self.migrated)?;
        write!(f, "Unchanged: {}", self.unchanged)?;
        if self.has_failures() {
            write!(f, "\nFailed: {}", self.failed_files.join(", "))?;
        }
        Ok(())
    }
}
