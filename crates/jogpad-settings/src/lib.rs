//! Jogpad Settings Crate
//!
//! Handles the configuration file: jog distances, display units, and key
//! bindings. [`Config`] also serves as the engine's read-only
//! [`jogpad_core::Preferences`] source.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, JogSettings, UiSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
