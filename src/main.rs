mod cli;
mod error;
mod logging;
mod summary;

use crate::cli::Cli;
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::{OptionExt, ResultExt};
use futures::StreamExt;
use modlist_config::{Config, ConfigLoader};
use modlist_library::Outcome;
use modlist_library::process::duplicates;
use modlist_library::scan::{ScanEvent, scan_events};
use modlist_render::{Registry, output_path, save};
use std::path::{Path, PathBuf};
use std::pin::pin;
use std::process::ExitCode;
use tracing::{debug, error, info};

/// Output file name used when none is configured.
const DEFAULT_OUTPUT: &str = "modlist";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            // Logging isn't set up yet.
            eprintln!("modlist: {err:?}");
            return ExitCode::FAILURE;
        },
    };
    if let Err(err) = logging::init(&config.log) {
        eprintln!("modlist: {err:?}");
        return ExitCode::FAILURE;
    }
    match run(&cli.dir, &config, cli.quiet).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let loader = ConfigLoader::new(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    cli.apply(loader).load().or_raise(|| ErrorKind::Config)
}

async fn run(dir: &Path, config: &Config, quiet: bool) -> Result<()> {
    let registry = Registry::standard();
    let writer = registry.get(&config.output.format).or_raise(|| ErrorKind::Config)?;
    let pipeline = config.pipeline().or_raise(|| ErrorKind::Config)?;
    let destination = output_path(
        config.output.path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        writer.as_ref(),
    );
    info!(
        dir = %dir.display(),
        output = %destination.display(),
        format = writer.name(),
        "modlist {}",
        env!("CARGO_PKG_VERSION")
    );

    let mut events = pin!(scan_events(dir, config.scan_options()));
    let (mut total, mut scanned) = (0u64, 0u64);
    let mut completed = None;
    while let Some(event) = events.next().await {
        match event.or_raise(|| ErrorKind::Scan)? {
            ScanEvent::Started => debug!("scan started"),
            ScanEvent::DiscoveryComplete(count) => {
                total = count;
                info!("found {count} archive(s)");
            },
            ScanEvent::Scanned { outcome, .. } => {
                scanned += 1;
                match &outcome {
                    Outcome::Record(record) => {
                        debug!("[{scanned}/{total}] {} {} ({})", record.display_name, record.version, record.loader);
                    },
                    Outcome::Failure(failure) => debug!("[{scanned}/{total}] {}: {}", failure.file_name(), failure.kind),
                }
            },
            ScanEvent::Complete(result) => completed = Some(result),
        }
    }
    let result = completed.ok_or_raise(|| ErrorKind::Scan)?;

    let processed = pipeline.apply(&result);
    let saved = save(writer.as_ref(), &processed, &config.render_options(), &destination).or_raise(|| ErrorKind::Output)?;
    if !quiet {
        print!("{}", summary::summary(&processed, &duplicates(&processed)));
        println!("\nOutput saved to {}", saved.display());
    }
    Ok(())
}
