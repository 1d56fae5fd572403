//! Whole-document migration
//!
//! Parses raw bytes, runs [`migrate_entry`] over `forkRelationships`, and
//! re-encodes only when something changed. Unchanged documents hand back the
//! caller's bytes untouched.

use crate::error::DocumentError;
use crate::fork::{migrate_entry, EntryReport, FORK_RELATIONSHIPS};
use serde_json::Value;
use std::borrow::Cow;

/// Result of migrating one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration<'a> {
    /// Output bytes; borrowed from the input when unchanged
    pub bytes: Cow<'a, [u8]>,
    /// Whether the document needs rewriting
    pub changed: bool,
    /// Entry-level breakdown
    pub report: EntryReport,
}

impl<'a> Migration<'a> {
    fn unchanged(raw: &'a [u8], report: EntryReport) -> Self {
        Self {
            bytes: Cow::Borrowed(raw),
            changed: false,
            report,
        }
    }
}

/// Migrate a raw JSON document
///
/// Documents without a `forkRelationships` array (including non-object
/// roots) come back byte-identical with `changed == false`.
///
/// # Errors
/// - `DocumentError::Parse` if `raw` is not valid JSON
/// - `DocumentError::Encode` if the migrated value cannot be encoded
pub fn migrate_document(raw: &[u8]) -> Result<Migration<'_>, DocumentError> {
    let mut document: Value = serde_json::from_slice(raw).map_err(DocumentError::Parse)?;

    let report = migrate_value(&mut document);
    if !report.changed() {
        return Ok(Migration::unchanged(raw, report));
    }

    Ok(Migration {
        bytes: Cow::Owned(to_pretty_bytes(&document)?),
        changed: true,
        report,
    })
}

/// Migrate an already-parsed document in place
///
/// Returns an empty report when there is no `forkRelationships` array.
pub fn migrate_value(document: &mut Value) -> EntryReport {
    let mut report = EntryReport::default();
    if let Some(Value::Array(entries)) = document.get_mut(FORK_RELATIONSHIPS) {
        for entry in entries.iter_mut() {
            report.record(migrate_entry(entry));
        }
    }
    report
}

/// Encode a document the way the corpus stores it
///
/// Two-space indentation, non-ASCII kept literal, one trailing newline.
///
/// # Errors
/// `DocumentError::Encode` if serialization fails.
pub fn to_pretty_bytes(document: &Value) -> Result<Vec<u8>, DocumentError> {
    let mut bytes = serde_json::to_vec_pretty(document).map_err(DocumentError::Encode)?;
    bytes.push(b'\n');
    Ok(bytes)
}
