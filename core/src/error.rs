//! Error kinds raised by ingestion, query parsing and lookups.

use crate::DocumentId;
use thiserror::Error;

/// Reasons a document is refused at ingestion. Nothing is mutated when one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("document id {0} is negative")]
    NegativeId(DocumentId),
    #[error("document id {0} is already indexed")]
    DuplicateId(DocumentId),
    #[error("document {0} contains control characters")]
    InvalidCharacters(DocumentId),
}

/// Reasons raw query text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("no term after '-'")]
    EmptyNegation,
    #[error("term {0:?} has more than one leading '-'")]
    DoubleNegation(String),
    #[error("term {0:?} contains control characters")]
    InvalidCharacters(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid document: {0}")]
    InvalidDocument(#[from] DocumentError),
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),
    #[error("document {0} not found")]
    DocumentNotFound(DocumentId),
    #[error("position {position} is out of range, {count} documents indexed")]
    PositionOutOfRange { position: usize, count: usize },
    #[error("stop word {0:?} contains control characters")]
    InvalidStopWord(String),
}

impl SearchError {
    /// True for lookups of an id or position that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DocumentNotFound(_) | Self::PositionOutOfRange { .. })
    }
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
