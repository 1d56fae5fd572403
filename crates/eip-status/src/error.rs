//! Error types for the document transform

/// Errors while migrating a single document
///
/// These never carry a file path; the directory runner attaches one.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Input is not valid JSON text
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Migrated document could not be encoded
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

impl DocumentError {
    /// Line of the parse failure, when known
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse(e) => Some(e.line()),
            Self::Encode(_) => None,
        }
    }
}
