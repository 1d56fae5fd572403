//! Document storage
//!
//! The runner reads and writes documents through [`DocumentStore`]. The
//! filesystem implementation replaces files atomically: the new content is
//! staged in a temporary file next to the target and renamed over it, so a
//! failed write leaves the original bytes in place.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Source and sink of raw document bytes
pub trait DocumentStore {
    /// Read the whole document
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the document with `bytes`
    ///
    /// On error the previous content must still be intact.
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Filesystem store with atomic replace
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl DocumentStore for FsStore {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        // replace the link target, not the link
        let target = fs::canonicalize(path)?;
        let dir = target.parent().unwrap_or_else(|| Path::new("."));
        let permissions = fs::metadata(&target)?.permissions();

        // dropped (and removed) on any early return
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;
        staged.as_file().set_permissions(permissions)?;
        staged.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}
