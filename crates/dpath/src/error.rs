use crate::prelude_internal::*;

/// A path could not be normalized, resolved or written.
#[derive(Debug, PartialEq, thiserror::Error, Clone)]
#[error("Path error: {kind} at {path}")]
pub struct PathError {
    pub kind: PathErrorKind,
    /// Segments consumed up to and including the one that failed.
    pub path: Path,
}

impl PathError {
    pub fn new(kind: PathErrorKind, path: Path) -> Self {
        Self { kind, path }
    }

    pub fn cause(&self) -> ErrorCause {
        self.kind.cause()
    }
}

#[derive(Debug, PartialEq, thiserror::Error, Clone)]
pub enum PathErrorKind {
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot index {found} with {index}")]
    NotIndexable { index: usize, found: ValueKind },
    #[error("key `{key}` not found")]
    KeyNotFound { key: String },
    #[error("cannot look up key `{key}` in {found}")]
    NotKeyable { key: String, found: ValueKind },
    #[error("no element matches {filter}")]
    FilterNotFound { filter: String },
    #[error("cannot apply {filter} to {found}, expected a sequence")]
    NotFilterable { filter: String, found: ValueKind },
    #[error("first segment must be a key, got {segment}")]
    InvalidLeadingSegment { segment: String },
    #[error("cannot write `{segment}` into {found}")]
    ShapeMismatch { segment: String, found: ValueKind },
    #[error("`{token}` is not a valid index")]
    InvalidIndex { token: String },
    #[error("{found} is not an appendable container")]
    NotAppendable { found: ValueKind },
}

/// Coarse classification of [`PathErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCause {
    /// A numeric segment was out of range or applied to a non-sequence.
    IndexAccess,
    /// A key segment was absent or applied to a non-map.
    KeyAccess,
    /// No sequence element satisfied a filter clause.
    FilterNotFound,
    /// The path does not fit the structure it writes into, or is malformed.
    Shape,
}

impl PathErrorKind {
    pub fn cause(&self) -> ErrorCause {
        match self {
            Self::IndexOutOfRange { .. } | Self::NotIndexable { .. } => ErrorCause::IndexAccess,
            Self::KeyNotFound { .. } | Self::NotKeyable { .. } => ErrorCause::KeyAccess,
            Self::FilterNotFound { .. } | Self::NotFilterable { .. } => ErrorCause::FilterNotFound,
            Self::InvalidLeadingSegment { .. }
            | Self::ShapeMismatch { .. }
            | Self::InvalidIndex { .. }
            | Self::NotAppendable { .. } => ErrorCause::Shape,
        }
    }
}
