//! Platform-specific configuration paths.
//!
//! - **User config**: `~/.config/pleth/config.toml` (Linux),
//!   `~/Library/Application Support/pleth/config.toml` (macOS),
//!   `%APPDATA%\pleth\config.toml` (Windows)

use std::path::PathBuf;

use crate::error::{ConfigError, FileOp};

/// Application name used for directory paths.
const APP_NAME: &str = "pleth";

/// File name of the user configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user configuration file.
pub fn user_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Ensures the user config directory exists, creating it if necessary.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::io(FileOp::CreateDir, &dir, e))?;
    }

    Ok(dir)
}
