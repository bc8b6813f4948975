use crate::error::{ErrorKind, Result};
use crate::scan::ScanOptions;
use glob::Pattern;
use modlist_archive::disabled;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

const ARCHIVE_EXTENSION: &str = ".jar";

/// An archive selected for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position in traversal order.
    pub index: usize,
    pub path: PathBuf,
}

/// Enumerate the archives under `root` that a scan should visit, in a
/// deterministic order (file names sorted within each directory).
///
/// # Errors
///
/// - [`RootNotFound`](ErrorKind::RootNotFound) or
///   [`NotADirectory`](ErrorKind::NotADirectory) if `root` is unusable.
/// - [`InvalidPattern`](ErrorKind::InvalidPattern) if an exclude pattern
///   isn't a valid glob.
///
/// Entries that can't be read while walking (eg. a subdirectory without
/// permission) are skipped with a warning.
#[instrument(skip(options), fields(root = %root.display(), recursive = options.recursive))]
pub fn discover(root: &Path, options: &ScanOptions) -> Result<Vec<Candidate>> {
    let metadata = std::fs::metadata(root).map_err(|_| ErrorKind::RootNotFound(root.to_path_buf()))?;
    if !metadata.is_dir() {
        exn::bail!(ErrorKind::NotADirectory(root.to_path_buf()));
    }
    let exclude = compile(&options.exclude)?;

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(if options.recursive { usize::MAX } else { 1 })
        .follow_links(true)
        .sort_by_file_name();
    let mut candidates = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            },
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !is_archive_name(&name, options.include_disabled) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if exclude.iter().any(|pattern| pattern.matches(&name) || pattern.matches_path(relative)) {
            debug!(path = %relative.display(), "excluded");
            continue;
        }
        candidates.push(Candidate {
            index: candidates.len(),
            path: entry.into_path(),
        });
    }
    debug!(count = candidates.len(), "discovery complete");
    Ok(candidates)
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| {
                exn::Exn::from(ErrorKind::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
        })
        .collect()
}

/// `*.jar`, plus `*.jar.disabled` when disabled archives are included.
/// Extensions are matched case-insensitively.
fn is_archive_name(name: &str, include_disabled: bool) -> bool {
    let (stem, is_disabled) = disabled::split(name);
    if is_disabled && !include_disabled {
        return false;
    }
    stem.len() > ARCHIVE_EXTENSION.len()
        && stem.get(stem.len() - ARCHIVE_EXTENSION.len()..).is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}
