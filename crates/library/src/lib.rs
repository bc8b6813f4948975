//! Scanning a directory of mod archives into a [`ScanResult`], and the
//! post-processing applied to it before output.
//!
//! The primary entry point is [`scan::scan_events`], which discovers the
//! archives under a directory, identifies each one on a pool of blocking
//! workers and streams progress as it goes. [`scan::scan`] drives it to
//! completion for callers that don't need progress.
//!
//! Identification never fails a scan. Each archive ends up as exactly one
//! [`Record`](modlist_extract::models::Record) or one [`Failure`], so
//! `successful() + failed() == total_candidates` always holds.

pub mod error;
pub mod process;
mod result;
pub mod scan;

pub use crate::result::{Failure, FailureKind, Outcome, ScanResult};
