//! EIP status migration
//!
//! Rewrites the legacy single-value `status` field of every
//! `forkRelationships` entry into the `statusHistory` sequence format.
//!
//! # Formats
//!
//! ```text
//! old: { "forkName": "Prague", "status": "Included" }
//! new: { "forkName": "Prague", "statusHistory": [{ "status": "Included" }] }
//! ```
//!
//! # Layers
//!
//! - [`fork`]: the per-entry rule
//! - [`document`]: whole-document transform over raw bytes
//!
//! The transform is pure and idempotent: feeding its output back in reports
//! no further change.
//!
//! # Example
//!
//! ```rust
//! use eip_status::migrate_document;
//!
//! let raw = br#"{"forkRelationships":[{"status":"Included"}]}"#;
//! let migration = migrate_document(raw).unwrap();
//! assert!(migration.changed);
//!
//! let again = migrate_document(&migration.bytes).unwrap();
//! assert!(!again.changed);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod document;
pub mod error;
pub mod fork;

pub use document::{migrate_document, migrate_value, to_pretty_bytes, Migration};
pub use error::DocumentError;
pub use fork::{
    migrate_entry, status_record, EntryOutcome, EntryReport, FORK_RELATIONSHIPS, STATUS,
    STATUS_HISTORY,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
