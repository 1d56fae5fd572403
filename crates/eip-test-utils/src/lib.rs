//! Testing utilities for the EIP migration workspace
//!
//! Shared fixtures and a throwaway data directory.

#![allow(missing_docs)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fork relationship entry in the legacy shape
pub fn legacy_fork(fork_name: &str, status: &str) -> Value {
    json!({ "forkName": fork_name, "status": status })
}

/// Fork relationship entry in the current shape
pub fn migrated_fork(fork_name: &str, statuses: &[&str]) -> Value {
    let history: Vec<Value> = statuses.iter().map(|s| json!({ "status": s })).collect();
    json!({ "forkName": fork_name, "statusHistory": history })
}

/// EIP document wrapping the given fork relationships
pub fn eip_document(id: u32, forks: Vec<Value>) -> Value {
    json!({
        "id": id,
        "title": format!("EIP-{id}"),
        "status": "Final",
        "forkRelationships": forks,
    })
}

/// EIP document with no `forkRelationships` field at all
pub fn bare_document(id: u32) -> Value {
    json!({ "id": id, "title": format!("EIP-{id}"), "status": "Draft" })
}

/// Temporary EIP data directory, removed on drop
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `value` the way a hand-edited corpus file looks (compact)
    pub fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        self.write_raw(name, &serde_json::to_string(value).unwrap())
    }

    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.file(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read_raw(&self, name: &str) -> Vec<u8> {
        fs::read(self.file(name)).unwrap()
    }

    pub fn read_json(&self, name: &str) -> Value {
        serde_json::from_slice(&self.read_raw(name)).unwrap()
    }
}

impl Default for DataDir {
    fn default() -> Self {
        Self::new()
    }
}
