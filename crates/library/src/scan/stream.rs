use crate::error::{ErrorKind, Result};
use crate::result::{Failure, FailureKind, Outcome, ScanResult};
use crate::scan::{Candidate, ScanOptions, discover, scan_file};
use async_stream::stream;
use futures::{Stream, StreamExt};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use time::UtcDateTime;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{error, info};

/// Progress events emitted by [`scan_events`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started) - exactly once.
/// 2. [`DiscoveryComplete`](Self::DiscoveryComplete) - exactly once, with the
///    number of archives that will be scanned.
/// 3. [`Scanned`](Self::Scanned) - once per archive, in completion order.
/// 4. [`Complete`](Self::Complete) - exactly once, carrying the aggregate.
///
/// A fatal error terminates the stream early, in which case
/// [`Complete`](Self::Complete) is never emitted.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// Scanning has begun; emitted exactly once before any other event.
    Started,
    /// Discovery has finished; the total count is now known.
    DiscoveryComplete(u64),
    /// An archive has been scanned. `index` is its position in discovery
    /// order.
    Scanned { index: usize, outcome: Outcome },
    /// Every archive has been scanned; the stream is finished.
    Complete(ScanResult),
}

/// Scan every archive under `root`, streaming [`ScanEvent`]s as it goes.
///
/// Archives are discovered up-front (see [`discover`]), then identified by a
/// pool of `options.workers` blocking tasks. Each worker claims the next
/// unclaimed archive from a shared cursor until none remain, and sends its
/// outcome to this stream, which is the only owner of the aggregate.
///
/// The aggregate lists records and failures in discovery order, so the result
/// doesn't depend on the worker count or on scheduling.
///
/// Per-archive problems never end the stream; only the fatal conditions in
/// [`ErrorKind`] do.
pub fn scan_events(root: impl Into<PathBuf>, options: ScanOptions) -> impl Stream<Item = Result<ScanEvent>> {
    let root = root.into();
    // `rustfmt` does not format macros that use braces. Wrap in parentheses!
    stream!({
        yield Ok(ScanEvent::Started);
        if options.workers == 0 {
            yield Err(exn::Exn::from(ErrorKind::InvalidWorkerCount(options.workers)));
            return;
        }

        let started_at = UtcDateTime::now();
        let clock = Instant::now();
        let discovery = {
            let (root, options) = (root.clone(), options.clone());
            tokio::task::spawn_blocking(move || discover(&root, &options)).await
        };
        let candidates = match discovery {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(err)) => {
                yield Err(err);
                return;
            },
            Err(join) => {
                yield Err(exn::Exn::from(ErrorKind::Worker(join.to_string())));
                return;
            },
        };
        let total_candidates = candidates.len();
        // Infallible: a usize (either 32- or 64-bit) will always fit in a u64.
        yield Ok(ScanEvent::DiscoveryComplete(u64::try_from(total_candidates).unwrap_or(u64::MAX)));
        info!(root = %root.display(), total_candidates, workers = options.workers, "scanning archives");

        let paths: Vec<PathBuf> = candidates.iter().map(|candidate| candidate.path.clone()).collect();
        let mut slots: Vec<Option<Outcome>> = vec![None; total_candidates];
        let mut outcomes = spawn_workers(candidates, &options);
        while let Some((index, outcome)) = outcomes.recv().await {
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(outcome.clone());
            }
            yield Ok(ScanEvent::Scanned { index, outcome });
        }
        let duration = clock.elapsed();

        let mut records = Vec::new();
        let mut failures = Vec::new();
        for (slot, path) in slots.into_iter().zip(paths) {
            match slot {
                Some(Outcome::Record(record)) => records.push(record),
                Some(Outcome::Failure(failure)) => failures.push(failure),
                // Every worker reports before exiting, even after a panic.
                None => {
                    error!(path = %path.display(), "archive was never scanned");
                    failures.push(Failure::new(path, FailureKind::Unreadable, "archive was never scanned"));
                },
            }
        }
        let result = ScanResult {
            records,
            failures,
            started_at,
            duration,
            total_candidates,
            generated_at: UtcDateTime::now(),
        };
        info!(
            successful = result.successful(),
            failed = result.failed(),
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "scan complete"
        );
        yield Ok(ScanEvent::Complete(result));
    })
}

/// Scan every archive under `root` and return the aggregate. See
/// [`scan_events`] for the progress-reporting variant.
///
/// # Errors
///
/// Only the fatal conditions described in [`ErrorKind`].
pub async fn scan(root: impl Into<PathBuf>, options: ScanOptions) -> Result<ScanResult> {
    let mut events = std::pin::pin!(scan_events(root, options));
    while let Some(event) = events.next().await {
        if let ScanEvent::Complete(result) = event? {
            return Ok(result);
        }
    }
    exn::bail!(ErrorKind::Worker("scan ended before completing".to_string()))
}

fn spawn_workers(candidates: Vec<Candidate>, options: &ScanOptions) -> UnboundedReceiver<(usize, Outcome)> {
    let candidates: Arc<[Candidate]> = candidates.into();
    let cursor = Arc::new(AtomicUsize::new(0));
    let options = Arc::new(options.clone());
    let (sender, receiver) = unbounded_channel();
    for _ in 0..options.workers.min(candidates.len()) {
        let (candidates, cursor, options, sender) = (candidates.clone(), cursor.clone(), options.clone(), sender.clone());
        tokio::task::spawn_blocking(move || {
            while let Some(candidate) = candidates.get(cursor.fetch_add(1, Ordering::Relaxed)) {
                let outcome = scan_guarded(candidate, &options);
                if sender.send((candidate.index, outcome)).is_err() {
                    // The stream was dropped; nobody is listening.
                    break;
                }
            }
        });
    }
    receiver
}

/// [`scan_file`], with a panic converted into an
/// [`Unreadable`](FailureKind::Unreadable) failure.
fn scan_guarded(candidate: &Candidate, options: &ScanOptions) -> Outcome {
    catch_unwind(AssertUnwindSafe(|| scan_file(candidate, options))).unwrap_or_else(|payload| {
        let detail = format!("panic while scanning: {}", panic_message(payload.as_ref()));
        error!(path = %candidate.path.display(), %detail, "scan panicked");
        Outcome::Failure(Failure::new(&candidate.path, FailureKind::Unreadable, detail))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use super::*;
    use modlist_archive::fixture::JarBuilder;
    use modlist_extract::models::Loader;
    use std::path::Path;
    use tempfile::TempDir;

    fn fabric(dir: &Path, file_name: &str, id: &str, version: &str) {
        JarBuilder::new()
            .entry("fabric.mod.json", format!(r#"{{"id": "{id}", "version": "{version}"}}"#))
            .write_to(dir.join(file_name));
    }

    fn corrupt(dir: &Path, file_name: &str) {
        std::fs::write(dir.join(file_name), b"this is not a zip archive").unwrap();
    }

    fn with_workers(workers: usize) -> ScanOptions {
        ScanOptions {
            workers,
            ..ScanOptions::default()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_scan_record_and_failure() {
        let dir = TempDir::new().unwrap();
        fabric(dir.path(), "jei.jar", "jei", "11.6.0.1013");
        corrupt(dir.path(), "corrupt.jar");

        let result = scan(dir.path(), ScanOptions::default()).await.unwrap();
        assert_eq!(result.total_candidates, 2);
        assert_eq!(result.successful(), 1);
        assert_eq!(result.failed(), 1);
        assert_eq!(result.records[0].identifier, "jei");
        assert_eq!(result.records[0].version, "11.6.0.1013");
        assert_eq!(result.records[0].loader, Loader::Fabric);
        assert_eq!(result.failures[0].kind, FailureKind::Unreadable);
        assert_eq!(result.failures[0].file_name(), "corrupt.jar");
    }

    #[tokio::test]
    async fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        let result = scan(dir.path(), ScanOptions::default()).await.unwrap();
        assert_eq!(result.total_candidates, 0);
        assert!(result.records.is_empty());
        assert!(result.failures.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_worker_count_does_not_change_result() {
        let dir = TempDir::new().unwrap();
        for n in 0..12 {
            fabric(dir.path(), &format!("mod{n:02}.jar"), &format!("mod{n:02}"), "1.0.0");
        }
        corrupt(dir.path(), "mod05-broken.jar");
        corrupt(dir.path(), "zzz-broken.jar");

        let single = scan(dir.path(), with_workers(1)).await.unwrap();
        let many = scan(dir.path(), with_workers(8)).await.unwrap();
        assert_eq!(single.records, many.records);
        assert_eq!(single.failures, many.failures);
        assert_eq!(many.successful() + many.failed(), many.total_candidates);
        assert_eq!(many.total_candidates, 14);
    }

    #[tokio::test]
    async fn test_events_in_order() {
        let dir = TempDir::new().unwrap();
        fabric(dir.path(), "a.jar", "a", "1");
        fabric(dir.path(), "b.jar", "b", "1");

        let events: Vec<ScanEvent> =
            scan_events(dir.path(), with_workers(2)).map(|event| event.unwrap()).collect().await;
        assert!(matches!(events.first(), Some(ScanEvent::Started)));
        assert!(matches!(events.get(1), Some(ScanEvent::DiscoveryComplete(2))));
        let mut indices: Vec<usize> = events
            .iter()
            .filter_map(|event| match event {
                ScanEvent::Scanned { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, [0, 1]);
        assert!(matches!(events.last(), Some(ScanEvent::Complete(result)) if result.successful() == 2));
    }

    #[tokio::test]
    async fn test_zero_workers_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = scan(dir.path(), with_workers(0)).await.unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidWorkerCount(0));
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("mods");
        let err = scan(&missing, ScanOptions::default()).await.unwrap_err();
        assert_eq!(*err, ErrorKind::RootNotFound(missing));
    }

    #[tokio::test]
    async fn test_excluded_archives_are_not_counted() {
        let dir = TempDir::new().unwrap();
        fabric(dir.path(), "keep.jar", "keep", "1");
        corrupt(dir.path(), "skip.jar");
        let options = ScanOptions {
            exclude: vec!["skip*".to_string()],
            ..ScanOptions::default()
        };
        let result = scan(dir.path(), options).await.unwrap();
        assert_eq!(result.total_candidates, 1);
        assert_eq!(result.failed(), 0);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(42);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
