use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "dockdash.log";

/// `RUST_LOG` wins, then `--verbose`, then the configured level.
fn build_filter(level: &str, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
        }
    })
}

/// Sends tracing output to `<dir>/dockdash.log`. The terminal belongs to the
/// dashboard, so nothing is written to stdout or stderr.
pub fn init_tracing(dir: &Path, level: &str, verbose: bool) -> Result<()> {
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(build_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(path = %path.display(), "logging initialised");
    Ok(())
}
