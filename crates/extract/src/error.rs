//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use modlist_archive::error::{Error as ArchiveError, ErrorKind as ArchiveErrorKind};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No extractor recognised a descriptor in the archive.
    #[display("no known mod descriptor found")]
    NoApplicableExtractor,
    /// A descriptor entry exists but could not be read from the archive.
    #[display("archive error: {_0}")]
    Archive(ArchiveErrorKind),
    /// The descriptor is not syntactically valid (JSON/TOML) or has the wrong shape.
    #[display("malformed {descriptor}: {reason}")]
    InvalidDescriptor {
        /// Descriptor entry name.
        descriptor: &'static str,
        /// Details about the parsing failure.
        reason: String,
    },
    /// A required field could not be found in the descriptor.
    #[display("{descriptor}: missing required field '{field}'")]
    MissingField {
        /// Descriptor entry name.
        descriptor: &'static str,
        /// The field that is missing or empty.
        field: &'static str,
    },
    /// A value was found but could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// Details about the parsing failure.
        value: String,
    },
}

impl ErrorKind {
    /// Convert an archive error into an extraction error, preserving the
    /// archive crate's `Exn` frame as a child in its own error tree.
    #[track_caller]
    pub fn archive(err: ArchiveError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Archive(inner))
    }

    /// Returns `true` if the archive was recognised, but its descriptor is
    /// broken (as opposed to no descriptor being present at all).
    pub fn is_malformed(&self) -> bool {
        !matches!(self, ErrorKind::NoApplicableExtractor)
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Descriptors are either valid or they're not.
        false
    }
}
