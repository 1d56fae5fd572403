//! Fork relationship entry migration
//!
//! A fork relationship entry is one element of a document's
//! `forkRelationships` array. Object entries end up carrying a
//! `statusHistory` array and no string `status`; anything else is left as is.

use serde::Serialize;
use serde_json::{Map, Value};

/// Document field holding the fork relationship entries
pub const FORK_RELATIONSHIPS: &str = "forkRelationships";

/// Legacy single-value status field
pub const STATUS: &str = "status";

/// Ordered status record sequence
pub const STATUS_HISTORY: &str = "statusHistory";

/// What happened to a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryOutcome {
    /// Not an object; passed through untouched
    Passthrough,
    /// No string `status`; only ensured a `statusHistory` key
    Normalized,
    /// `status` promoted into a fresh one-record `statusHistory`
    Promoted,
    /// `status` removed; existing history kept (or empty status discarded)
    Dropped,
}

impl EntryOutcome {
    /// Whether this outcome makes the document dirty
    #[inline]
    #[must_use]
    pub fn is_change(self) -> bool {
        matches!(self, Self::Promoted | Self::Dropped)
    }
}

/// Per-document tally of entry outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    /// Non-object entries
    pub passthrough: usize,
    /// Object entries without a string `status`
    pub normalized: usize,
    /// Entries whose `status` became the history
    pub promoted: usize,
    /// Entries whose `status` was discarded
    pub dropped: usize,
}

impl EntryReport {
    /// Count one outcome
    pub fn record(&mut self, outcome: EntryOutcome) {
        match outcome {
            EntryOutcome::Passthrough => self.passthrough += 1,
            EntryOutcome::Normalized => self.normalized += 1,
            EntryOutcome::Promoted => self.promoted += 1,
            EntryOutcome::Dropped => self.dropped += 1,
        }
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: &Self) {
        self.passthrough += other.passthrough;
        self.normalized += other.normalized;
        self.promoted += other.promoted;
        self.dropped += other.dropped;
    }

    /// Whether any entry changed
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.promoted + self.dropped > 0
    }

    /// Total entries seen
    #[inline]
    #[must_use]
    pub fn entries(&self) -> usize {
        self.passthrough + self.normalized + self.promoted + self.dropped
    }
}

/// Build a `{ "status": <status> }` record
#[must_use]
pub fn status_record(status: &str) -> Value {
    let mut record = Map::new();
    record.insert(STATUS.to_owned(), Value::String(status.to_owned()));
    Value::Object(record)
}

/// Migrate one fork relationship entry in place
///
/// An existing `statusHistory` is kept only when it is a non-empty array.
/// An empty one counts as absent, so a non-empty `status` still lands in it.
/// A `status` that is not a string is left where it is.
pub fn migrate_entry(entry: &mut Value) -> EntryOutcome {
    let Value::Object(fields) = entry else {
        return EntryOutcome::Passthrough;
    };

    let mut history = match fields.get_mut(STATUS_HISTORY) {
        Some(Value::Array(existing)) => std::mem::take(existing),
        _ => Vec::new(),
    };

    let outcome = match fields.get(STATUS) {
        Some(Value::String(status)) if !status.is_empty() && history.is_empty() => {
            history.push(status_record(status));
            EntryOutcome::Promoted
        }
        Some(Value::String(_)) => EntryOutcome::Dropped,
        _ => EntryOutcome::Normalized,
    };

    // insert keeps the slot of an existing key
    fields.insert(STATUS_HISTORY.to_owned(), Value::Array(history));
    if outcome.is_change() {
        fields.shift_remove(STATUS);
    }
    outcome
}
