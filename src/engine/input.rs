//! Key handling for SceneEngine

use super::SceneEngine;
use crate::input::KeyAction;

impl SceneEngine {
    /// Run the action bound to `key` (a winit `KeyCode` name such as
    /// `"Digit1"`). Returns the action that ran, if any.
    pub fn handle_key(&mut self, key: &str) -> Option<KeyAction> {
        let action = self.options.keybindings.lookup(key)?;
        log::debug!("key {key} -> {action:?}");
        self.execute(action);
        Some(action)
    }

    /// Run an action directly.
    pub fn execute(&mut self, action: KeyAction) {
        if let Some(kind) = action.path() {
            self.select_path(kind);
        } else {
            log::info!("quit requested");
            self.quit_requested = true;
        }
    }
}
