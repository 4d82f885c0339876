//! Errors raised while reading, parsing or writing the settings file.

use std::path::PathBuf;
use thiserror::Error;

/// Settings file failure.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Cannot read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML is invalid or does not fit the schema.
    ///
    /// `line` and `column` are one-based, or 0 when the parser gave no span.
    #[error("Invalid settings at {path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// An explicitly named settings file is missing.
    #[error("Settings file not found: {path}")]
    NotFound { path: PathBuf },

    /// `config init` without `--force` found a file in place.
    #[error("Settings file already exists: {path} (use --force to replace it)")]
    AlreadyExists { path: PathBuf },

    /// Writing the settings file or its backup failed.
    #[error("Cannot write settings file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A humantime duration field does not parse.
    #[error("Invalid duration '{value}' for {field}: {message}")]
    InvalidDuration {
        /// Dotted field name, e.g. `tui.tick_rate`.
        field: &'static str,
        value: String,
        message: String,
    },
}
