//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Only conditions that abort a whole scan are errors. Archives that can't be
//! identified are reported per item as a [`Failure`](crate::Failure) instead.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies why a scan could not run.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The root directory does not exist (or can't be inspected).
    #[display("directory not found: {}", _0.display())]
    RootNotFound(#[error(not(source))] PathBuf),
    /// The root path exists but is not a directory.
    #[display("not a directory: {}", _0.display())]
    NotADirectory(#[error(not(source))] PathBuf),
    /// The worker pool must have at least one worker.
    #[display("worker count must be at least 1, got {_0}")]
    InvalidWorkerCount(#[error(not(source))] usize),
    /// An exclude pattern is not a valid glob.
    #[display("invalid exclude pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as given.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A worker task could not be joined.
    #[display("scan worker failed: {_0}")]
    Worker(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Worker(_))
    }
}
