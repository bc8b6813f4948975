//! Render Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No writer is registered under this name.
    #[display("unknown output format: {_0}")]
    UnknownFormat(#[error(not(source))] String),
    /// The serializer rejected the result.
    #[display("failed to serialize {format} output: {reason}")]
    Serialize {
        format: &'static str,
        reason: String,
    },
    /// The rendered output could not be written.
    #[display("failed to write {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Io { .. })
    }
}
