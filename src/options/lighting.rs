use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Single-light Lambert shading parameters.
pub struct LightingOptions {
    /// World-space light position; `w = 0` makes it directional.
    pub light_position: [f32; 4],
    /// Ambient term added to every fragment.
    pub ambient: f32,
    /// Diffuse weight of the light.
    pub diffuse: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            light_position: [10.0, 10.0, 10.0, 0.0],
            ambient: 0.35,
            diffuse: 0.65,
        }
    }
}
