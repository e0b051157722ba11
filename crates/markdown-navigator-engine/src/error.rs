use crate::io::IoError;
use crate::models::DocumentId;

/// Failures reported by the engine.
///
/// Malformed markdown is never an error (the parser recovers with plain
/// text) and an unresolved reference is an empty result, so neither appears
/// here.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An edit outside the replaceable range, on an element that can't be
    /// renamed, or one that would change the element's structure. The
    /// document is left untouched.
    #[error("Invalid manipulation: {0}")]
    InvalidManipulation(String),

    /// The request was made against a version that a newer edit has
    /// superseded. Callers should re-issue it against the latest document.
    #[error("Stale version {requested} of {document}, current version is {current}")]
    StaleVersion {
        document: DocumentId,
        requested: u64,
        current: u64,
    },

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("Document not found: {0}")]
    NotFound(DocumentId),
}

impl EngineError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidManipulation(message.into())
    }
}
