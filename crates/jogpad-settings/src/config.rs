//! Configuration management for Jogpad
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, picked by file extension.
//!
//! Configuration is organized into sections:
//! - UI preferences (measurement system used for display and jog distances)
//! - Jog settings (selected distance preset, custom distance, preset list)
//! - Key bindings (key name to action name)

pub use jogpad_core::units::MeasurementSystem;
use jogpad_core::{PreferenceKey, Preferences};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// UI preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Display units
    pub measurement_system: MeasurementSystem,
}

/// Jog distance settings
///
/// Distances are kept as text, the way the operator typed them. An empty
/// `selected_distance` means no preset is chosen and `custom_distance`
/// (millimeters) applies instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JogSettings {
    /// Chosen preset, already in display units
    pub selected_distance: String,
    /// Free-form distance in millimeters
    pub custom_distance: String,
    /// Presets offered to the operator
    pub distance_presets: Vec<String>,
}

impl Default for JogSettings {
    fn default() -> Self {
        Self {
            selected_distance: "1".to_string(),
            custom_distance: "10".to_string(),
            distance_presets: ["1", "0.1", "0.01", "0.001"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

fn default_keybindings() -> BTreeMap<String, String> {
    [
        ("x", "X_AXIS"),
        ("y", "Y_AXIS"),
        ("z", "Z_AXIS"),
        ("=", "JOG_FORWARD"),
        ("+", "JOG_FORWARD"),
        ("-", "JOG_BACKWARD"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI preferences
    pub ui: UiSettings,
    /// Jog settings
    pub jog: JogSettings,
    /// Key name to action name
    pub keybindings: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiSettings::default(),
            jog: JogSettings::default(),
            keybindings: default_keybindings(),
        }
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

fn check_distance(key: &str, value: &str) -> SettingsResult<()> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(()),
        Ok(_) => Err(SettingsError::invalid(key, "must be a finite, non-negative number")),
        Err(_) => Err(SettingsError::invalid(key, format!("'{}' is not a number", value))),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    ///
    /// Jog distances must be non-negative numbers (an empty selected
    /// distance is allowed), and key bindings must name both a key and an
    /// action.
    pub fn validate(&self) -> SettingsResult<()> {
        if !self.jog.selected_distance.trim().is_empty() {
            check_distance("jog.selected_distance", &self.jog.selected_distance)?;
        }
        check_distance("jog.custom_distance", &self.jog.custom_distance)?;

        for preset in &self.jog.distance_presets {
            check_distance("jog.distance_presets", preset)?;
        }

        for (key, action) in &self.keybindings {
            if key.trim().is_empty() {
                return Err(SettingsError::invalid("keybindings", "empty key name"));
            }
            if action.trim().is_empty() {
                return Err(SettingsError::invalid(
                    "keybindings",
                    format!("key '{}' has no action", key),
                ));
            }
        }

        Ok(())
    }
}

impl Preferences for Config {
    fn preference(&self, key: PreferenceKey) -> Option<String> {
        match key {
            PreferenceKey::SelectedDistance => Some(self.jog.selected_distance.clone()),
            PreferenceKey::CustomDistance => Some(self.jog.custom_distance.clone()),
        }
    }
}
