//! Centralized runtime options with TOML file support.
//!
//! Window, camera paths, projection, lighting, display and keybindings are
//! consolidated here. Every section uses `#[serde(default)]` so a partial
//! TOML file (e.g. only overriding `[camera]`) works.

mod camera;
mod display;
mod keybindings;
mod lighting;
mod projection;
mod window;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use projection::ProjectionOptions;
use serde::{Deserialize, Serialize};
pub use window::WindowOptions;

use crate::error::TableauError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Initial window parameters.
    pub window: WindowOptions,
    /// Look-at target and scripted camera paths.
    pub camera: CameraOptions,
    /// Orthographic view volume.
    pub projection: ProjectionOptions,
    /// Light position and shading weights.
    pub lighting: LightingOptions,
    /// Clear colour and sphere tessellation.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TableauError::Io`] if the file cannot be read and
    /// [`TableauError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, TableauError> {
        let content = std::fs::read_to_string(path).map_err(TableauError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TableauError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, TableauError> {
        toml::from_str(content)
            .map_err(|e| TableauError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`TableauError::OptionsParse`] if serialization fails and
    /// [`TableauError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), TableauError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TableauError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TableauError::Io)?;
        }
        std::fs::write(path, content).map_err(TableauError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
spiral_radius = 12.0
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.spiral_radius, 12.0);
        // Everything else should be default
        assert_eq!(opts.camera.linear_steps, 5000);
        assert_eq!(opts.projection.far, 20.0);
        assert_eq!(opts.window.width, 512);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Options::from_toml("[camera\nspiral_radius = ").unwrap_err();
        assert!(matches!(err, TableauError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("Digit1"),
            Some(KeyAction::LinearPath)
        );
        assert_eq!(
            opts.keybindings.lookup("Digit2"),
            Some(KeyAction::SpiralPath)
        );
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Quit));
        assert_eq!(opts.keybindings.lookup("KeyQ"), Some(KeyAction::Quit));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
        assert_eq!(
            opts.keybindings.keys_for(KeyAction::Quit),
            vec!["Escape", "KeyQ"]
        );
    }

    #[test]
    fn keybindings_override_from_toml() {
        let toml_str = r#"
[keybindings.bindings]
KeyL = "linear_path"
KeyS = "spiral_path"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.keybindings.lookup("KeyL"), Some(KeyAction::LinearPath));
        // A supplied table replaces the defaults wholesale.
        assert_eq!(opts.keybindings.lookup("Digit1"), None);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir().join("tableau-options-test");
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.window.title = "spiral study".into();
        opts.projection.preserve_aspect = true;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(opts, loaded);
        std::fs::remove_file(&path).unwrap();
    }
}
