//! The serialisable shape of a report, shared by the structured formats.

use modlist_extract::models::Record;
use modlist_library::{Failure, ScanResult};
use serde::Serialize;
use std::time::Duration;
use time::UtcDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Serialize)]
pub(crate) struct Report<'a> {
    pub mods: &'a [Record],
    pub total_mods: usize,
    pub total_files_scanned: usize,
    pub scan_duration_seconds: f64,
    pub started_at: String,
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FailureView<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FailureView<'a> {
    pub path: String,
    pub kind: &'static str,
    pub detail: &'a str,
}

impl<'a> Report<'a> {
    pub(crate) fn new(result: &'a ScanResult, include_errors: bool) -> Self {
        let errors = (include_errors && !result.failures.is_empty())
            .then(|| result.failures.iter().map(FailureView::from).collect::<Vec<_>>());
        Self {
            mods: &result.records,
            total_mods: result.successful(),
            total_files_scanned: result.total_candidates,
            scan_duration_seconds: seconds(result.duration),
            started_at: timestamp(result.started_at),
            generated_at: timestamp(result.generated_at),
            error_count: errors.as_ref().map(Vec::len),
            errors,
        }
    }
}

impl<'a> From<&'a Failure> for FailureView<'a> {
    fn from(failure: &'a Failure) -> Self {
        Self {
            path: failure.path.display().to_string(),
            kind: failure.kind.as_str(),
            detail: &failure.detail,
        }
    }
}

/// Seconds, rounded to two decimal places.
pub(crate) fn seconds(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 100.0).round() / 100.0
}

/// RFC 3339, falling back to the Unix timestamp.
pub(crate) fn timestamp(at: UtcDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.unix_timestamp().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds() {
        assert_eq!(seconds(Duration::from_millis(1234)), 1.23);
        assert_eq!(seconds(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_timestamp() {
        let at = UtcDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(timestamp(at), "2023-11-14T22:13:20Z");
    }
}
