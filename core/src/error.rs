use crate::document::DocumentId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the engine. All of them are caller input errors and
/// leave the engine exactly as it was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid document {id}: {reason}")]
    InvalidDocument { id: DocumentId, reason: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("document {0} not found")]
    NotFound(DocumentId),

    #[error("stop word {0:?} contains control characters")]
    InvalidStopWord(String),
}

impl Error {
    pub(crate) fn invalid_document(id: DocumentId, reason: impl Into<String>) -> Self {
        Self::InvalidDocument { id, reason: reason.into() }
    }

    pub(crate) fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery(reason.into())
    }
}
