use std::fs::OpenOptions;
use std::sync::{Mutex, OnceLock};

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt};

use crate::LogDir;

/// File inside a run directory that [`init_in`] appends events to.
pub const LOG_FILE: &str = "log.txt";

static INIT: OnceLock<bool> = OnceLock::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// A `fmt` layer that appends plain-text events to `filename` inside `logdir`.
pub fn file_layer<S>(
    logdir: &LogDir,
    filename: &str,
) -> Result<Box<dyn Layer<S> + Send + Sync + 'static>>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let path = logdir.file(filename)?;
    let file = OpenOptions::new()
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path))?;
    Ok(fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .boxed())
}

/// Log to stderr (filtered by `RUST_LOG`, default `info`). Later calls are no-ops.
pub fn init() {
    INIT.get_or_init(|| {
        let subscriber = Registry::default()
            .with(env_filter())
            .with(fmt::layer().with_target(false));
        tracing::subscriber::set_global_default(subscriber).is_ok()
    });
}

/// Log to stderr and to [`LOG_FILE`] in `logdir`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case nothing is written to the run directory.
pub fn init_in(logdir: &LogDir) -> Result<bool> {
    if INIT.get().is_some() {
        return Ok(false);
    }
    let layer = file_layer(logdir, LOG_FILE)?;
    let installed = *INIT.get_or_init(|| {
        let subscriber = Registry::default()
            .with(env_filter())
            .with(fmt::layer().with_target(false))
            .with(layer);
        tracing::subscriber::set_global_default(subscriber).is_ok()
    });
    Ok(installed)
}
