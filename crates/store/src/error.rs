//! Store error types.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error reading or writing a document.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document on disk could not be parsed.
    #[error("corrupt document {document}: {message}")]
    Corrupt {
        /// Document file name.
        document: &'static str,
        /// Parser message.
        message: String,
    },

    /// A record could not be serialized for writing.
    #[error("failed to serialize {document}: {message}")]
    Serialize {
        /// Document file name.
        document: &'static str,
        /// Serializer message.
        message: String,
    },

    /// The referenced record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An optimistic-concurrency check failed: someone else mutated the
    /// record since it was read.
    #[error("version mismatch: expected {expected}, record is at {actual}")]
    VersionMismatch {
        /// Version the caller read.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },
}

impl StoreError {
    /// Whether this error means "somebody else got there first" rather than
    /// a storage fault.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::VersionMismatch { .. })
    }
}
