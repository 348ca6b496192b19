use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Framebuffer clear colour and sphere tessellation.
pub struct DisplayOptions {
    /// RGBA clear colour.
    pub clear_color: [f64; 4],
    /// Azimuthal subdivisions of the sphere.
    pub sphere_slices: u32,
    /// Polar subdivisions of the sphere.
    pub sphere_stacks: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            clear_color: [1.0, 1.0, 1.0, 1.0],
            sphere_slices: 20,
            sphere_stacks: 10,
        }
    }
}
