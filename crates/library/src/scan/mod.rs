//! Directory scanning.
//!
//! [`discover`] selects the archives under a root directory, [`scan_file`]
//! identifies one archive, and [`scan_events`]/[`scan`] run the whole
//! directory through a pool of blocking workers.

mod discover;
mod file;
mod options;
mod stream;

pub use self::discover::{Candidate, discover};
pub use self::file::scan_file;
pub use self::options::{DEFAULT_WORKERS, ScanOptions};
pub use self::stream::{ScanEvent, scan, scan_events};
