//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `TDASH_LOG` environment variable, falling back to the configured level.
//!
//! # Usage
//!
//! ```bash
//! # Configured level (info by default)
//! tdash tui
//!
//! # Debug level
//! TDASH_LOG=debug tdash tui
//!
//! # Module-specific filtering
//! TDASH_LOG=tile_dashboard::layout=trace,warn tdash tui
//! ```
//!
//! The dashboard owns the terminal, so it logs to a file; the other
//! commands log to stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "TDASH_LOG";

/// File name of the dashboard log inside the data directory.
pub const LOG_FILE_NAME: &str = "tdash.log";

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Initialize the tracing subscriber writing to stderr.
///
/// Does nothing if a global subscriber is already set.
pub fn init_stderr(level: LogLevel) {
    let _ = fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize the tracing subscriber appending to `path`.
///
/// Creates the parent directory if needed. Does nothing beyond opening the
/// file if a global subscriber is already set.
pub fn init_file(level: LogLevel, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = fmt()
        .with_env_filter(filter(level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
