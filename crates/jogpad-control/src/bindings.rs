//! Key bindings
//!
//! Maps key names (as the host reports them) to intents. The binding layer
//! itself only resolves keys; the engine decides what an intent does.

use std::collections::HashMap;
use thiserror::Error;

use crate::intent::Intent;

/// Errors raised while building bindings or parsing action names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The action name is not one the engine understands
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// The action does not accept the given argument
    #[error("Invalid argument for {action}: {value}")]
    InvalidArgument { action: String, value: String },

    /// A binding with an empty key name
    #[error("Empty key name")]
    EmptyKey,
}

/// Key name to intent map
#[derive(Debug, Clone, Default)]
pub struct InputBindings {
    keys: HashMap<String, Intent>,
}

impl InputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, action)` pairs, as stored in configuration
    pub fn from_pairs<I, K, A>(pairs: I) -> Result<Self, BindingError>
    where
        I: IntoIterator<Item = (K, A)>,
        K: AsRef<str>,
        A: AsRef<str>,
    {
        let mut bindings = Self::new();
        for (key, action) in pairs {
            bindings.bind(key.as_ref(), action.as_ref().parse()?)?;
        }
        Ok(bindings)
    }

    /// Bind a key, replacing any previous binding
    pub fn bind(&mut self, key: &str, intent: Intent) -> Result<(), BindingError> {
        if key.is_empty() {
            return Err(BindingError::EmptyKey);
        }
        if let Some(previous) = self.keys.insert(key.to_string(), intent) {
            tracing::debug!("Key '{}' rebound from {} to {}", key, previous, intent);
        }
        Ok(())
    }

    /// Remove a binding
    pub fn unbind(&mut self, key: &str) -> Option<Intent> {
        self.keys.remove(key)
    }

    /// Intent bound to a key
    pub fn resolve(&self, key: &str) -> Option<Intent> {
        self.keys.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jogpad_core::Axis;

    #[test]
    fn test_from_pairs() {
        let bindings = InputBindings::from_pairs([
            ("x", "X_AXIS"),
            ("]", "JOG_FORWARD"),
            ("F5", "SHUTTLE_ZONE 7"),
        ])
        .unwrap();
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings.resolve("x"), Some(Intent::SelectAxis(Axis::X)));
        assert_eq!(bindings.resolve("F5"), Some(Intent::ShuttleZone(7)));
        assert_eq!(bindings.resolve("q"), None);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let err = InputBindings::from_pairs([("p", "PROBE")]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown action: PROBE");
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut bindings = InputBindings::new();
        assert_eq!(
            bindings.bind("", Intent::JogForward),
            Err(BindingError::EmptyKey)
        );
    }

    #[test]
    fn test_rebind_and_unbind() {
        let mut bindings = InputBindings::new();
        bindings.bind("-", Intent::JogForward).unwrap();
        bindings.bind("-", Intent::JogBackward).unwrap();
        assert_eq!(bindings.resolve("-"), Some(Intent::JogBackward));
        assert_eq!(bindings.unbind("-"), Some(Intent::JogBackward));
        assert!(bindings.is_empty());
    }
}
