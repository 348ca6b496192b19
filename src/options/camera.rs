use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Look-at target and the two scripted camera paths.
pub struct CameraOptions {
    /// Point the camera always looks at.
    pub target: [f32; 3],
    /// Up direction.
    pub up: [f32; 3],
    /// Start of the linear pan (also the initial eye position).
    pub linear_start: [f32; 3],
    /// End of the linear pan.
    pub linear_end: [f32; 3],
    /// Ticks needed to cover the linear pan.
    pub linear_steps: u32,
    /// Start of the spiral descent.
    pub spiral_start: [f32; 3],
    /// End of the spiral descent; only its height is used.
    pub spiral_end: [f32; 3],
    /// Axis the spiral winds around (x and z are used).
    pub spiral_center: [f32; 3],
    /// Horizontal distance of the eye from the spiral axis.
    pub spiral_radius: f32,
    /// Ticks needed to cover the spiral; also one full revolution.
    pub spiral_steps: u32,
    /// Path ticks per second of wall-clock time.
    pub ticks_per_second: f32,
    /// Upper bound on ticks run in a single frame.
    pub max_ticks_per_frame: u32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            target: [0.0, 0.75, 0.0],
            up: [0.0, 1.0, 0.0],
            linear_start: [-6.0, 8.0, 6.0],
            linear_end: [6.0, 8.0, 6.0],
            linear_steps: 5000,
            spiral_start: [0.0, 5.0, 10.0],
            spiral_end: [0.0, 0.0, 10.0],
            spiral_center: [0.0, 0.75, 0.0],
            spiral_radius: 10.0,
            spiral_steps: 10_000,
            ticks_per_second: 1000.0,
            max_ticks_per_frame: 250,
        }
    }
}
