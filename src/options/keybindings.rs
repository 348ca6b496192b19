use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

/// Maps physical key strings to [`KeyAction`] values.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"Digit1"`, `"KeyQ"`, `"Escape"`, etc. Several keys may share one action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeybindingOptions {
    /// Forward map: key string → action.
    pub bindings: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("Digit1".into(), KeyAction::LinearPath),
            ("Numpad1".into(), KeyAction::LinearPath),
            ("Digit2".into(), KeyAction::SpiralPath),
            ("Numpad2".into(), KeyAction::SpiralPath),
            ("Escape".into(), KeyAction::Quit),
            ("KeyQ".into(), KeyAction::Quit),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }

    /// Every key bound to `action`, sorted.
    #[must_use]
    pub fn keys_for(&self, action: KeyAction) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}
