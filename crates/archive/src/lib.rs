//! Random-access reading of mod archives.
//!
//! Mod JARs are ZIP containers. This crate wraps the [`zip`] reader behind a
//! small [`ArchiveHandle`] that provides:
//!
//! - **Classified opening** ([`ArchiveHandle::open`]): corrupt, truncated,
//!   zero-byte or unreadable files fail with an
//!   [`ErrorKind`](crate::error::ErrorKind) instead of a raw I/O or ZIP error.
//! - **Cheap existence checks** ([`ArchiveHandle::has_entry`]) against the
//!   entry listing captured at open time, without decompressing anything.
//! - **Entry reads** ([`ArchiveHandle::read_bytes`],
//!   [`ArchiveHandle::read_text`]) capped at [`MAX_ENTRY_SIZE`] bytes.
//!
//! The handle owns the underlying file; dropping it releases the file on
//! every exit path of the caller.
//!
//! Archives carrying the inert `.disabled` suffix are recognised by the
//! [`disabled`] helpers; the suffix does not affect how the content is read.

mod decode;
pub mod disabled;
pub mod error;
#[cfg(any(test, feature = "fixture"))]
pub mod fixture;
mod handle;

pub use crate::decode::decode_text;
pub use crate::disabled::DISABLED_SUFFIX;
pub use crate::handle::ArchiveHandle;

/// Largest entry (uncompressed) that will be read into memory. Descriptors
/// are a few kilobytes at most; anything bigger is treated as corrupt.
pub const MAX_ENTRY_SIZE: u64 = 8 * 1024 * 1024;

/// Entry name of the JAR manifest.
pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";
