//! Read-only access to operator preferences
//!
//! The jog engine never owns the preference store. It is handed a
//! [`Preferences`] accessor at construction and queries raw values each time
//! a distance is resolved, so edits made elsewhere take effect on the next
//! intent.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Preference keys read by the jog engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// Currently selected jog distance preset, already in working units
    SelectedDistance,
    /// Custom jog distance in millimeters, used when no preset is selected
    CustomDistance,
}

impl PreferenceKey {
    /// Dotted store key
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelectedDistance => "jog.selectedDistance",
            Self::CustomDistance => "jog.customDistance",
        }
    }
}

impl std::fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only preference accessor
///
/// Values are returned verbatim; interpreting them (and degrading
/// unparsable input to zero) is the caller's job.
pub trait Preferences: Send + Sync {
    /// Raw value stored under `key`, if any
    fn preference(&self, key: PreferenceKey) -> Option<String>;
}

/// In-memory preference store
///
/// Useful for hosts that keep preferences elsewhere and for tests.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<PreferenceKey, String>>,
}

impl MemoryPreferences {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a value
    pub fn with(self, key: PreferenceKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a value
    pub fn set(&self, key: PreferenceKey, value: impl Into<String>) {
        self.values.write().insert(key, value.into());
    }

    /// Remove a value
    pub fn remove(&self, key: PreferenceKey) {
        self.values.write().remove(&key);
    }
}

impl Preferences for MemoryPreferences {
    fn preference(&self, key: PreferenceKey) -> Option<String> {
        self.values.read().get(&key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(PreferenceKey::SelectedDistance.as_str(), "jog.selectedDistance");
        assert_eq!(PreferenceKey::CustomDistance.to_string(), "jog.customDistance");
    }

    #[test]
    fn test_memory_preferences() {
        let prefs = MemoryPreferences::new().with(PreferenceKey::CustomDistance, "10");
        assert_eq!(prefs.preference(PreferenceKey::CustomDistance).as_deref(), Some("10"));
        assert_eq!(prefs.preference(PreferenceKey::SelectedDistance), None);

        prefs.set(PreferenceKey::SelectedDistance, "0.1");
        assert_eq!(prefs.preference(PreferenceKey::SelectedDistance).as_deref(), Some("0.1"));

        prefs.remove(PreferenceKey::SelectedDistance);
        assert_eq!(prefs.preference(PreferenceKey::SelectedDistance), None);
    }
}
