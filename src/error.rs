use thiserror::Error;

use crate::element::ElementId;

/// Errors reported by document operations.
///
/// None of these are fatal: the app logs them and keeps going. A stale id
/// coming from a panel that still shows a deleted element is the common case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("element {0} not found")]
    ElementNotFound(ElementId),

    #[error("element {0} is locked")]
    ElementLocked(ElementId),

    #[error("unknown element kind: {0}")]
    UnknownElementKind(String),

    #[error("unknown animation preset: {0}")]
    UnknownPreset(String),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
