use clap::Parser;
use modlist_config::ConfigLoader;
use std::path::PathBuf;

/// Inventory a folder of Minecraft mod archives and export a modlist.
///
/// Flags override the config file and `MODLIST_*` environment variables.
#[derive(Debug, Parser)]
#[command(name = "modlist", version, about)]
pub struct Cli {
    /// Folder containing mod archives.
    #[arg(default_value = ".")]
    pub dir: PathBuf,
    /// Output file; the format's extension is added if it has none [default: modlist].
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Output format: json, csv, markdown (md), yaml (yml).
    #[arg(short, long)]
    pub format: Option<String>,
    /// Scan subdirectories too.
    #[arg(short, long)]
    pub recursive: bool,
    /// Number of parallel workers.
    #[arg(short, long)]
    pub workers: Option<usize>,
    /// Glob patterns of file names to skip, eg. "*-sources.jar".
    #[arg(long, num_args = 1..)]
    pub exclude: Vec<String>,
    /// Include `.jar.disabled` archives, marked as disabled.
    #[arg(long)]
    pub include_disabled: bool,
    /// Report archives with no recognisable descriptor as failures.
    #[arg(long)]
    pub unknown_as_failure: bool,
    /// Minimise JSON output.
    #[arg(long)]
    pub compact: bool,
    /// Sort by name, loader, version or filename.
    #[arg(long)]
    pub sort_by: Option<String>,
    /// Reverse the sort order.
    #[arg(long, requires = "sort_by")]
    pub reverse: bool,
    /// Only keep mods for this loader.
    #[arg(long)]
    pub filter_loader: Option<String>,
    /// Drop mods whose loader couldn't be identified.
    #[arg(long)]
    pub exclude_unknown: bool,
    /// Keep only the first of several mods with the same identifier.
    #[arg(long)]
    pub no_duplicates: bool,
    /// Leave failures out of the output.
    #[arg(long)]
    pub no_errors: bool,
    /// trace, debug, info, warn or error.
    #[arg(long)]
    pub log_level: Option<String>,
    /// Also write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Only log errors and don't print the summary.
    #[arg(short, long)]
    pub quiet: bool,
    /// Read configuration from this file instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Layer every flag that was actually given on top of `loader`.
    pub fn apply(&self, mut loader: ConfigLoader) -> ConfigLoader {
        if let Some(output) = &self.output {
            loader = loader.set("output.path", output);
        }
        if let Some(format) = &self.format {
            loader = loader.set("output.format", format);
        }
        if let Some(workers) = self.workers {
            loader = loader.set("scan.workers", workers);
        }
        if !self.exclude.is_empty() {
            loader = loader.set("scan.exclude", &self.exclude);
        }
        if let Some(sort_by) = &self.sort_by {
            loader = loader.set("process.sort_by", sort_by);
        }
        if let Some(filter_loader) = &self.filter_loader {
            loader = loader.set("process.filter_loader", filter_loader);
        }
        if let Some(log_file) = &self.log_file {
            loader = loader.set("log.file", log_file);
        }
        let level = if self.quiet { Some("error") } else { self.log_level.as_deref() };
        if let Some(level) = level {
            loader = loader.set("log.level", level.to_lowercase());
        }

        let switches = [
            ("scan.recursive", self.recursive, true),
            ("scan.include_disabled", self.include_disabled, true),
            ("scan.unknown_as_failure", self.unknown_as_failure, true),
            ("output.compact", self.compact, true),
            ("output.include_errors", self.no_errors, false),
            ("process.reverse", self.reverse, true),
            ("process.exclude_unknown", self.exclude_unknown, true),
            ("process.dedup", self.no_duplicates, true),
        ];
        for (key, given, value) in switches {
            if given {
                loader = loader.set(key, value);
            }
        }
        loader
    }
}
