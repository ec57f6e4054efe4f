use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "gigadmin";

/// Per-user configuration directory.
///
/// - macOS: ~/Library/Application Support/gigadmin
/// - Windows: %APPDATA%\gigadmin
/// - Linux: $XDG_CONFIG_HOME/gigadmin or ~/.config/gigadmin
///
/// Directories are not created here; writers create them when they first save.
pub fn app_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Unable to determine the user config directory")?;
    Ok(base.join(APP_DIR))
}

/// Per-user data directory. Same layout as [`app_config_dir`], under the data root.
pub fn app_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Unable to determine the user data directory")?;
    Ok(base.join(APP_DIR))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(app_config_dir()?.join("config.toml"))
}

pub fn default_credentials_path() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("credentials.json"))
}
