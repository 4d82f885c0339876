//! Default settings template and file creation.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tile-dashboard configuration
#
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/tile-dashboard/config.toml

# ==============================================================================
# Dashboard
# ==============================================================================

[tui]

# How often the dashboard redraws.
# Examples: "250ms", "500ms", "1s"
tick_rate = "250ms"

# How long the "Saved" confirmation stays visible after pressing `s`.
save_confirmation = "1s"

# ==============================================================================
# Layout storage
# ==============================================================================

[storage]

# Where the widget layout is kept between sessions.
#   file   - widgetConfig.json in `dir`
#   memory - kept only while the dashboard runs
#   none   - never loaded, saves are ignored
backend = "file"

# Directory for the file backend. Empty uses the platform data directory
# ($XDG_DATA_HOME/tile-dashboard on Linux). Tilde (~) is expanded.
dir = ""

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Options: "error", "warn", "info", "debug", "trace"
# The TDASH_LOG environment variable overrides this.
level = "info"

# Log file. Empty logs the dashboard to <data dir>/tdash.log and other
# commands to stderr.
file = ""
"#;

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// [`create_default_config`] for an explicit path.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::Write {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}
