use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::paths;

/// Environment variable consulted before the stored key.
pub const API_KEY_ENV: &str = "DEEPL_AUTH_KEY";

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/dlb/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// The stored DeepL API key, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Manages loading and saving the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/dlb/config.toml`
    /// or `~/.config/dlb/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn load_or_default(&self) -> ConfigFile {
        self.load().unwrap_or_default()
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// The API key from the config file; an empty key counts as unset.
    pub fn stored_api_key(&self) -> Option<String> {
        self.load_or_default()
            .api_key
            .filter(|key| !key.is_empty())
    }

    /// Stores the API key, preserving the rest of the configuration.
    /// An empty key clears the stored value.
    pub fn store_api_key(&self, api_key: &str) -> Result<()> {
        let mut config = self.load_or_default();
        config.api_key = Some(api_key.to_string()).filter(|key| !key.is_empty());
        self.save(&config)
    }
}

/// Resolves the API key to use: CLI option over environment over the
/// stored configuration.
pub fn resolve_api_key(cli_key: Option<&str>) -> Option<String> {
    if let Some(key) = cli_key
        && !key.is_empty()
    {
        return Some(key.to_string());
    }

    if let Ok(key) = std::env::var(API_KEY_ENV)
        && !key.is_empty()
    {
        return Some(key);
    }

    ConfigManager::new().ok()?.stored_api_key()
}
