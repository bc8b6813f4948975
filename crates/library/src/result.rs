use modlist_extract::models::{Loader, Record};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::time::Duration;
use time::UtcDateTime;

/// Why an archive produced no [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    /// The archive could not be opened or listed: corrupt, truncated, empty
    /// or inaccessible.
    Unreadable,
    /// A descriptor was found but its required fields could not be parsed.
    MalformedMetadata,
    /// No extractor recognised the archive (only reported as a failure when
    /// unknown archives are configured to be failures).
    UnknownLoader,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Unreadable => "unreadable",
            FailureKind::MalformedMetadata => "malformed_metadata",
            FailureKind::UnknownLoader => "unknown_loader",
        }
    }
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One archive that could not be identified. Carries no partial record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: PathBuf,
    pub kind: FailureKind,
    /// Human-readable reason.
    pub detail: String,
}

impl Failure {
    pub fn new(path: impl Into<PathBuf>, kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            detail: detail.into(),
        }
    }

    /// The failed archive's file name, for display.
    pub fn file_name(&self) -> String {
        self.path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
    }
}

/// What scanning a single archive produced: exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Record(Record),
    Failure(Failure),
}

impl Outcome {
    pub fn is_record(&self) -> bool {
        matches!(self, Outcome::Record(_))
    }
}

/// The aggregate of one scan. Post-processing never mutates a result in
/// place; it returns a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub records: Vec<Record>,
    pub failures: Vec<Failure>,
    pub started_at: UtcDateTime,
    /// Wall-clock time from the start of discovery to the last completion.
    pub duration: Duration,
    /// Number of archives discovered (after exclusions).
    pub total_candidates: usize,
    pub generated_at: UtcDateTime,
}

impl ScanResult {
    /// A result with nothing in it, as produced by scanning an empty directory.
    pub fn empty() -> Self {
        let now = UtcDateTime::now();
        Self {
            records: Vec::new(),
            failures: Vec::new(),
            started_at: now,
            duration: Duration::ZERO,
            total_candidates: 0,
            generated_at: now,
        }
    }

    pub fn successful(&self) -> usize {
        self.records.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Record count per loader, in [`Loader`] order.
    pub fn loader_counts(&self) -> BTreeMap<Loader, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.loader).or_insert(0) += 1;
        }
        counts
    }

    /// Same timing and accounting, different records. Used by post-processing.
    pub(crate) fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            records,
            failures: self.failures.clone(),
            ..*self
        }
    }
}
