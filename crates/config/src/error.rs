//! Config Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested config file does not exist.
    #[display("config file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The config file's extension isn't one of `toml`, `yaml`, `yml`, `json`.
    #[display("unsupported config file type: {}", _0.display())]
    UnsupportedFile(#[error(not(source))] PathBuf),
    /// A source could not be parsed or has the wrong shape.
    #[display("invalid configuration: {_0}")]
    Parse(#[error(not(source))] String),
    /// A value parsed, but isn't acceptable.
    #[display("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
