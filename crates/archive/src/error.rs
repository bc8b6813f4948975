//! Archive Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file exists and was read, but it is not a (complete) ZIP container.
    /// Don't retry with the same input.
    #[display("not a valid archive ({reason}): {}", path.display())]
    NotAnArchive {
        /// Archive that failed to open.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
    /// The file could not be opened or listed at all (missing, permissions).
    #[display("unreadable archive ({reason}): {}", path.display())]
    Unreadable {
        /// Archive that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },
    /// The requested entry is not present in the archive.
    #[display("entry not found: {_0}")]
    EntryMissing(#[error(not(source))] String),
    /// The entry exists but its content could not be decompressed or read.
    #[display("failed to read entry '{entry}': {reason}")]
    DecodeError {
        /// Entry name inside the archive.
        entry: String,
        /// Details about the failure.
        reason: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Unreadable { .. })
    }
}
