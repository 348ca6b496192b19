use serde::{Deserialize, Serialize};

use crate::camera::path::PathKind;

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// Digit1 = "linear_path"
/// Escape = "quit"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Restart the camera on the straight pan from L0 to L1.
    LinearPath,
    /// Restart the camera on the descending spiral from S0 to S1.
    SpiralPath,
    /// Close the window and leave the event loop.
    Quit,
}

impl KeyAction {
    /// Camera path started by this action, if any.
    #[must_use]
    pub fn path(self) -> Option<PathKind> {
        match self {
            Self::LinearPath => Some(PathKind::Linear),
            Self::SpiralPath => Some(PathKind::Spiral),
            Self::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_actions_map_to_paths() {
        assert_eq!(KeyAction::LinearPath.path(), Some(PathKind::Linear));
        assert_eq!(KeyAction::SpiralPath.path(), Some(PathKind::Spiral));
        assert_eq!(KeyAction::Quit.path(), None);
    }

    #[test]
    fn actions_serialize_as_snake_case() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            action: KeyAction,
        }
        let text = toml::to_string(&Wrapper {
            action: KeyAction::SpiralPath,
        })
        .unwrap();
        assert_eq!(text.trim(), r#"action = "spiral_path""#);
        let back: Wrapper = toml::from_str(r#"action = "quit""#).unwrap();
        assert_eq!(back.action, KeyAction::Quit);
    }
}
