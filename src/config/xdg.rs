//! Platform-aware path resolution for tile-dashboard.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/tile-dashboard` or `~/.config/tile-dashboard`
//! - Data (stored layout, log): `$XDG_DATA_HOME/tile-dashboard` or `~/.local/share/tile-dashboard`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides:
//! - Config: `$XDG_CONFIG_HOME/tile-dashboard` or `~/Library/Application Support/tile-dashboard`
//! - Data: `$XDG_DATA_HOME/tile-dashboard` or `~/Library/Application Support/tile-dashboard`

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "tile-dashboard";

/// `$<env_var>/tile-dashboard` when the variable is set, else
/// `<fallback>/tile-dashboard`. A missing fallback resolves against the
/// working directory.
fn app_dir(env_var: &str, fallback: Option<PathBuf>) -> PathBuf {
    std::env::var_os(env_var)
        .map(PathBuf::from)
        .or(fallback)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Directory holding `config.toml`.
pub fn config_dir() -> PathBuf {
    app_dir("XDG_CONFIG_HOME", platform_config_dir())
}

/// Platform config base directory, ignoring `XDG_CONFIG_HOME`.
fn platform_config_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::config_dir()
    } else {
        dirs::home_dir().map(|home| home.join(".config"))
    }
}

/// Path of the settings file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Directory holding the stored layout and the dashboard log.
pub fn data_dir() -> PathBuf {
    app_dir("XDG_DATA_HOME", dirs::data_dir())
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, or no home directory is known, it
/// is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        (None, Some(home)) if path == "~" => home,
        _ => PathBuf::from(path),
    }
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
