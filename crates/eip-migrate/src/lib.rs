//! EIP statusHistory migration runner
//!
//! Applies [`eip_status::migrate_document`] to every `.json` file directly
//! inside a data directory, rewriting only files that change.
//!
//! # Flow
//!
//! ```text
//! data_dir → discover (sorted) → read → migrate_document → write if changed → Summary
//! ```
//!
//! Per-file failures are logged and counted as unchanged. A missing data
//! directory aborts the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use eip_migrate::{run, MigratorConfig};
//!
//! let summary = run(MigratorConfig::new("src/data/eips")).unwrap();
//! println!("{summary}");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod logging;
pub mod migrator;
pub mod store;
pub mod summary;

pub use config::{MigratorConfig, DEFAULT_DATA_DIR, DOCUMENT_EXTENSION};
pub use error::{MigrateError, MigrateResult};
pub use migrator::{discover_documents, run, FileOutcome, Migrator, RunObserver};
pub use store::{DocumentStore, FsStore};
pub use summary::Summary;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
