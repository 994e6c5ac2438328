//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so while it runs logs only go to `--log-file`
//! (or nowhere). The one-shot commands log to stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

/// `RUST_LOG` wins; otherwise `debug` with `--verbose`, else `info`.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

pub fn init(target: LogTarget<'_>, verbose: bool) -> Result<(), AppError> {
    let filter = env_filter(verbose);
    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| AppError::runtime(format!("Failed to initialize logging: {e}"))),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    AppError::input(format!("Failed to open log file '{}': {e}", path.display()))
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| AppError::runtime(format!("Failed to initialize logging: {e}")))
        }
    }
}
