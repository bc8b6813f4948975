use crate::result::{Failure, FailureKind, Outcome};
use crate::scan::{Candidate, ScanOptions};
use modlist_archive::ArchiveHandle;
use modlist_extract::{Chain, Context, fallback};
use tracing::{debug, instrument, warn};

/// Identify a single archive.
///
/// Total: every problem with the archive becomes a [`Failure`], never an
/// error.
///
/// 1. **Open** the archive; anything that stops it being opened or listed
///    is [`Unreadable`](FailureKind::Unreadable).
/// 2. **Resolve** it through the default extractor [`Chain`]. A recognised
///    descriptor that can't be parsed is
///    [`MalformedMetadata`](FailureKind::MalformedMetadata).
/// 3. **Fall back** when no extractor recognises it: either an
///    [`UnknownLoader`](FailureKind::UnknownLoader) failure or a best-effort
///    `Unknown` record, depending on [`ScanOptions::unknown_as_failure`].
///
/// The archive is closed before this returns.
#[instrument(skip_all, fields(path = %candidate.path.display()))]
pub fn scan_file(candidate: &Candidate, options: &ScanOptions) -> Outcome {
    let path = &candidate.path;
    let mut handle = match ArchiveHandle::open(path) {
        Ok(handle) => handle,
        Err(err) => {
            let detail = err.to_string();
            warn!(%detail, "unreadable archive");
            return Outcome::Failure(Failure::new(path, FailureKind::Unreadable, detail));
        },
    };
    let context = Context::from_handle(&handle);
    match Chain::default().resolve(&mut handle, &context) {
        Ok(record) => Outcome::Record(record),
        Err(err) if err.is_malformed() => {
            let detail = err.to_string();
            warn!(%detail, "malformed metadata");
            Outcome::Failure(Failure::new(path, FailureKind::MalformedMetadata, detail))
        },
        Err(_) if options.unknown_as_failure => {
            warn!("no known mod descriptor");
            Outcome::Failure(Failure::new(path, FailureKind::UnknownLoader, "no known mod descriptor found"))
        },
        Err(_) => {
            debug!("no known mod descriptor, using fallback");
            Outcome::Record(fallback(&mut handle, &context))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modlist_archive::fixture::JarBuilder;
    use modlist_extract::models::Loader;
    use std::path::Path;
    use tempfile::TempDir;

    fn candidate(dir: &Path, name: &str, jar: Option<JarBuilder>) -> Candidate {
        let path = dir.join(name);
        match jar {
            Some(jar) => jar.write_to(&path),
            None => std::fs::write(&path, b"PK\x03\x04 definitely not finished").unwrap(),
        }
        Candidate { index: 0, path }
    }

    fn record(outcome: Outcome) -> modlist_extract::models::Record {
        match outcome {
            Outcome::Record(record) => record,
            Outcome::Failure(failure) => panic!("expected a record, got {failure:?}"),
        }
    }

    fn failure(outcome: Outcome) -> Failure {
        match outcome {
            Outcome::Failure(failure) => failure,
            Outcome::Record(record) => panic!("expected a failure, got {record:?}"),
        }
    }

    #[test]
    fn test_scan_fabric() {
        let dir = TempDir::new().unwrap();
        let jar = JarBuilder::new().entry("fabric.mod.json", r#"{"id": "jei", "version": "11.6.0.1013"}"#);
        let record = record(scan_file(&candidate(dir.path(), "jei.jar", Some(jar)), &ScanOptions::default()));
        assert_eq!(record.identifier, "jei");
        assert_eq!(record.version, "11.6.0.1013");
        assert_eq!(record.loader, Loader::Fabric);
    }

    #[test]
    fn test_scan_disabled() {
        let dir = TempDir::new().unwrap();
        let jar = JarBuilder::new().entry("fabric.mod.json", r#"{"id": "sodium", "version": "0.5.3"}"#);
        let record = record(scan_file(&candidate(dir.path(), "sodium.jar.disabled", Some(jar)), &ScanOptions::default()));
        assert!(record.disabled);
        assert_eq!(record.identifier, "sodium");
        assert_eq!(record.source_filename, "sodium.jar.disabled");
    }

    #[test]
    fn test_scan_corrupt() {
        let dir = TempDir::new().unwrap();
        let failure = failure(scan_file(&candidate(dir.path(), "corrupt.jar", None), &ScanOptions::default()));
        assert_eq!(failure.kind, FailureKind::Unreadable);
        assert_eq!(failure.file_name(), "corrupt.jar");
    }

    #[test]
    fn test_scan_malformed() {
        let dir = TempDir::new().unwrap();
        let jar = JarBuilder::new().entry("fabric.mod.json", r#"{"name": "No Id"}"#);
        let failure = failure(scan_file(&candidate(dir.path(), "noid.jar", Some(jar)), &ScanOptions::default()));
        assert_eq!(failure.kind, FailureKind::MalformedMetadata);
        assert!(failure.detail.contains("id"));
    }

    #[test]
    fn test_scan_oversized_descriptor() {
        let dir = TempDir::new().unwrap();
        let oversized = vec![b' '; usize::try_from(modlist_archive::MAX_ENTRY_SIZE).unwrap() + 1];
        let jar = JarBuilder::new().entry("fabric.mod.json", &oversized);
        let failure = failure(scan_file(&candidate(dir.path(), "huge.jar", Some(jar)), &ScanOptions::default()));
        assert_eq!(failure.kind, FailureKind::MalformedMetadata);
        assert_eq!(failure.file_name(), "huge.jar");
    }

    #[test]
    fn test_scan_unknown() {
        let dir = TempDir::new().unwrap();
        let jar = || JarBuilder::new().entry("com/example/Lib.class", "x");
        let unknown = record(scan_file(&candidate(dir.path(), "lib.jar", Some(jar())), &ScanOptions::default()));
        assert_eq!(unknown.loader, Loader::Unknown);
        assert_eq!(unknown.display_name, "lib");

        let options = ScanOptions {
            unknown_as_failure: true,
            ..ScanOptions::default()
        };
        let failure = failure(scan_file(&candidate(dir.path(), "lib2.jar", Some(jar())), &options));
        assert_eq!(failure.kind, FailureKind::UnknownLoader);
    }
}
