//! Layered configuration for modlist.
//!
//! Sources are merged in increasing order of precedence:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. A config file: either the one given explicitly, or the first of
//!    `modlist.toml`, `modlist.yaml`, `modlist.yml`, `modlist.json` found in
//!    the platform config directory (see [`default_file`]).
//! 3. `MODLIST_`-prefixed environment variables, with `__` separating
//!    sections (`MODLIST_SCAN__WORKERS=8`).
//! 4. Overrides set by the caller ([`ConfigLoader::set`]), ie. command-line
//!    flags.
//!
//! The merged configuration is validated before it's returned.

pub mod error;
mod loader;

use crate::error::{ErrorKind, Result};
use modlist_extract::models::Loader;
use modlist_library::process::{Pipeline, SortField};
use modlist_library::scan::{DEFAULT_WORKERS, ScanOptions};
use modlist_render::{Registry, RenderOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::loader::{ConfigLoader, ENV_PREFIX, default_file};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
    pub process: ProcessConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub recursive: bool,
    pub workers: usize,
    pub exclude: Vec<String>,
    pub include_disabled: bool,
    pub unknown_as_failure: bool,
}

impl Default for ScanConfig {
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Registered format name, eg. `json` or `md`.
    pub format: String,
    /// Output file; the format's extension is appended if it has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub compact: bool,
    pub include_errors: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            path: None,
            compact: false,
            include_errors: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    pub reverse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_loader: Option<String>,
    pub exclude_unknown: bool,
    pub dedup: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub level: String,
    /// Also write logs to this file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Reject values that deserialised fine but can't be used.
    ///
    /// # Errors
    ///
    /// [`InvalidValue`](ErrorKind::InvalidValue) naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        if self.scan.workers == 0 {
            exn::bail!(ErrorKind::InvalidValue {
                field: "scan.workers",
                reason: "must be at least 1".to_string(),
            });
        }
        if !Registry::standard().contains(&self.output.format) {
            exn::bail!(ErrorKind::InvalidValue {
                field: "output.format",
                reason: format!("unknown format '{}'", self.output.format),
            });
        }
        if !LOG_LEVELS.contains(&self.log.level.trim().to_lowercase().as_str()) {
            exn::bail!(ErrorKind::InvalidValue {
                field: "log.level",
                reason: format!("expected one of {}, got '{}'", LOG_LEVELS.join(", "), self.log.level),
            });
        }
        self.pipeline()?;
        Ok(())
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            recursive: self.scan.recursive,
            workers: self.scan.workers,
            exclude: self.scan.exclude.clone(),
            include_disabled: self.scan.include_disabled,
            unknown_as_failure: self.scan.unknown_as_failure,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            include_errors: self.output.include_errors,
            compact: self.output.compact,
        }
    }

    /// The post-processing steps this configuration asks for.
    ///
    /// # Errors
    ///
    /// [`InvalidValue`](ErrorKind::InvalidValue) if the sort field or loader
    /// filter isn't recognised.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let sort = match &self.process.sort_by {
            Some(field) => Some(field.parse::<SortField>().map_err(|reason| ErrorKind::InvalidValue {
                field: "process.sort_by",
                reason,
            })?),
            None => None,
        };
        let filter_loader = match &self.process.filter_loader {
            Some(loader) => Some(loader.parse::<Loader>().map_err(|err| ErrorKind::InvalidValue {
                field: "process.filter_loader",
                reason: err.to_string(),
            })?),
            None => None,
        };
        Ok(Pipeline {
            filter_loader,
            exclude_unknown: self.process.exclude_unknown,
            dedup: self.process.dedup,
            sort: sort.map(|field| (field, self.process.reverse)),
        })
    }
}
