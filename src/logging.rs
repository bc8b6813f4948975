use crate::error::{ErrorKind, Result};
use modlist_config::LogConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber: human-readable logs on stderr (stdout is
/// left for the summary), plus a plain-text copy in `config.file` if set.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.to_lowercase()));
    let file = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ErrorKind::Logging(format!("{}: {e}", path.display())))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        },
        None => None,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file)
        .try_init()
        .map_err(|e| ErrorKind::Logging(e.to_string()))?;
    Ok(())
}
