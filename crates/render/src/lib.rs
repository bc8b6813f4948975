//! Output formats for scan results.
//!
//! Each format is a [`Writer`]. Formats are looked up by name through a
//! [`Registry`], which the caller builds once per run (usually with
//! [`Registry::standard`]).

mod csv;
pub mod error;
mod json;
mod markdown;
mod registry;
mod view;
mod yaml;

use crate::error::{ErrorKind, Result};
use modlist_library::ScanResult;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub use crate::csv::Csv;
pub use crate::json::Json;
pub use crate::markdown::Markdown;
pub use crate::registry::Registry;
pub use crate::yaml::Yaml;

/// Options shared by every writer. Writers ignore what doesn't apply to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Include per-archive failures in the output.
    pub include_errors: bool,
    /// Minimise whitespace (JSON only).
    pub compact: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_errors: true,
            compact: false,
        }
    }
}

/// Serialises a [`ScanResult`] into one output format.
pub trait Writer: Send + Sync {
    /// Human-facing format name.
    fn name(&self) -> &'static str;

    /// File extension, including the leading dot.
    fn extension(&self) -> &'static str;

    /// Render the whole result as a string.
    ///
    /// # Errors
    ///
    /// [`Serialize`](ErrorKind::Serialize) if the serialiser rejects the data.
    fn render(&self, result: &ScanResult, options: &RenderOptions) -> Result<String>;
}

/// `path`, with the writer's extension appended if it has none.
pub fn output_path(path: impl AsRef<Path>, writer: &dyn Writer) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        let mut with_extension = path.as_os_str().to_owned();
        with_extension.push(writer.extension());
        PathBuf::from(with_extension)
    }
}

/// Render `result` and save it to `path` (see [`output_path`]). Returns the
/// path actually written.
///
/// # Errors
///
/// Anything [`Writer::render`] returns, or [`Io`](ErrorKind::Io) if the file
/// can't be written.
#[instrument(skip_all, fields(format = writer.name()))]
pub fn save(writer: &dyn Writer, result: &ScanResult, options: &RenderOptions, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = output_path(path, writer);
    let content = writer.render(result, options)?;
    std::fs::write(&path, content).map_err(|e| ErrorKind::Io {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), "saved {} output", writer.name());
    Ok(path)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use modlist_extract::models::{Loader, Record};
    use modlist_library::{Failure, FailureKind};
    use std::collections::BTreeSet;
    use std::time::Duration;
    use tempfile::TempDir;
    use time::UtcDateTime;

    pub(crate) fn sample() -> ScanResult {
        let at = UtcDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        ScanResult {
            records: vec![
                Record {
                    display_name: "Just Enough Items".to_string(),
                    identifier: "jei".to_string(),
                    loader: Loader::Fabric,
                    version: "11.6.0.1013".to_string(),
                    source_filename: "jei-1.19.2-fabric.jar".to_string(),
                    authors: Some("mezz".to_string()),
                    description: Some("Item and recipe viewing, \"fast\".".to_string()),
                    target_platform_versions: vec!["1.19.2".to_string()],
                    dependencies: BTreeSet::from(["fabricloader".to_string(), "minecraft".to_string()]),
                    disabled: false,
                },
                Record {
                    display_name: "Create | Kinetics".to_string(),
                    identifier: "create".to_string(),
                    loader: Loader::Forge,
                    version: "0.5.1.f".to_string(),
                    source_filename: "create-1.20.1-0.5.1.f.jar.disabled".to_string(),
                    authors: Some("simibubi, Others".to_string()),
                    description: None,
                    target_platform_versions: vec!["1.20.1".to_string(), "1.20.2".to_string()],
                    dependencies: BTreeSet::new(),
                    disabled: true,
                },
            ],
            failures: vec![Failure::new("mods/corrupt.jar", FailureKind::Unreadable, "not a valid archive (empty file)")],
            started_at: at,
            duration: Duration::from_millis(1530),
            total_candidates: 3,
            generated_at: at,
        }
    }

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("modlist", &Json), PathBuf::from("modlist.json"));
        assert_eq!(output_path("out/mods.txt", &Json), PathBuf::from("out/mods.txt"));
        assert_eq!(output_path("mods", &Markdown), PathBuf::from("mods.md"));
    }

    #[test]
    fn test_save() {
        let dir = TempDir::new().unwrap();
        let written = save(&Csv, &sample(), &RenderOptions::default(), dir.path().join("modlist")).unwrap();
        assert_eq!(written, dir.path().join("modlist.csv"));
        assert!(std::fs::read_to_string(written).unwrap().starts_with("Name,"));
    }
}
