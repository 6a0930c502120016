//! XDG-style path utilities for configuration and cache data.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "dlb";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/dlb` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/dlb` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => Ok(PathBuf::from(xdg).join(APP_DIR)),
        Err(_) => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

/// Returns the cache directory.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/dlb` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/dlb` otherwise
pub fn cache_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CACHE_HOME") {
        Ok(xdg) => Ok(PathBuf::from(xdg).join(APP_DIR)),
        Err(_) => Ok(home_dir()?.join(".cache").join(APP_DIR)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
