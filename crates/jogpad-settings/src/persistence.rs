//! Settings Persistence
//!
//! Loads and saves the configuration file at a fixed location, falling
//! back to defaults when no file exists yet.

use crate::config::Config;
use crate::error::{ConfigError, SettingsError, SettingsResult};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "jogpad";
const CONFIG_FILE: &str = "config.toml";

/// Configuration bound to the file it came from
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    path: PathBuf,
    config: Config,
}

impl SettingsPersistence {
    /// Platform config directory for Jogpad (`<config_dir>/jogpad`)
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into())
    }

    /// Default config file path
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load the config at `path`, or defaults if the file does not exist
    pub fn load_or_default(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let config = if path.exists() {
            Config::load_from_file(&path)?
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Config::default()
        };
        Ok(Self { path, config })
    }

    /// Load from the default location
    pub fn load_default() -> SettingsResult<Self> {
        Self::load_or_default(Self::default_path()?)
    }

    /// Write the config back, creating parent directories as needed
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        self.config.save_to_file(&self.path)
    }

    /// Path this config is bound to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Consume and return the config
    pub fn into_config(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_ends_with_app_file() {
        if let Ok(path) = SettingsPersistence::default_path() {
            assert!(path.ends_with("jogpad/config.toml"));
        }
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsPersistence::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.config(), &Config::default());
    }
}
