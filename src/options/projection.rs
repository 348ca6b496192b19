use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Orthographic view volume in eye space.
pub struct ProjectionOptions {
    /// Left clipping plane.
    pub left: f32,
    /// Right clipping plane.
    pub right: f32,
    /// Bottom clipping plane.
    pub bottom: f32,
    /// Top clipping plane.
    pub top: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
    /// Widen or narrow the horizontal extent to the viewport aspect instead
    /// of stretching the image on resize.
    pub preserve_aspect: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            left: -4.0,
            right: 4.0,
            bottom: -4.0,
            top: 4.0,
            near: 1.0,
            far: 20.0,
            preserve_aspect: false,
        }
    }
}
