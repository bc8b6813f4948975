/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 4;

/// Options controlling discovery and per-archive scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Size of the worker pool; must be at least 1.
    pub workers: usize,
    /// Glob patterns matched against each file name and root-relative path.
    pub exclude: Vec<String>,
    /// Also scan archives renamed with the `.disabled` suffix.
    pub include_disabled: bool,
    /// Report unrecognised archives as failures instead of `Unknown` records.
    pub unknown_as_failure: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            workers: DEFAULT_WORKERS,
            exclude: Vec::new(),
            include_disabled: false,
            unknown_as_failure: false,
        }
    }
}
