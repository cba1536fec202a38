//! Path resolution for the built-in defaults file and the user
//! configuration file.

use anyhow::Result;
use std::path::PathBuf;

use crate::constants::{APP_NAME, DEFAULT_SETTINGS_FILENAME, USER_CONF_FILENAME};

/// Returns the platform-specific settings directory for scour.
///
/// Returns `~/.config/scour/` on Linux (`XDG_CONFIG_HOME/scour`).
///
/// # Errors
///
/// Returns an error if the platform's config directory cannot be determined.
pub fn settings_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join(APP_NAME);
    Ok(dir)
}

/// Returns the full path to the built-in default-settings file.
///
/// Returns `~/.config/scour/default_scourrc` on Linux.
pub fn default_settings_path() -> Result<PathBuf> {
    Ok(settings_dir()?.join(DEFAULT_SETTINGS_FILENAME))
}

/// Returns the default user configuration path: `.scourrc` in the current
/// working directory.
pub fn user_conf_default() -> PathBuf {
    PathBuf::from(USER_CONF_FILENAME)
}
