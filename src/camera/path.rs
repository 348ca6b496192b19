//! Scripted camera paths.
//!
//! Two paths are available. The linear pan slides the eye along +X from L0
//! until it has covered the distance to L1. The spiral descent orbits the
//! scene while dropping from S0 to the height of S1, completing one
//! revolution over the full descent. Each path advances in discrete ticks;
//! the first tick after a selection only snaps the eye to the path start.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec3;

use super::core::Camera;
use crate::options::CameraOptions;

/// Which path the camera is following.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathKind {
    /// No path selected; the camera holds still.
    #[default]
    Stopped,
    /// Straight pan from L0 towards L1.
    Linear,
    /// Descending orbit from S0 to S1.
    Spiral,
}

/// Geometry of both paths, resolved from [`CameraOptions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathGeometry {
    /// Linear path start.
    pub linear_start: Vec3,
    /// Linear path end.
    pub linear_end: Vec3,
    /// Ticks to cover the linear path.
    pub linear_steps: u32,
    /// Spiral path start.
    pub spiral_start: Vec3,
    /// Spiral path end.
    pub spiral_end: Vec3,
    /// Spiral axis position (x and z used).
    pub spiral_center: Vec3,
    /// Spiral orbit radius.
    pub spiral_radius: f32,
    /// Ticks to cover the spiral descent.
    pub spiral_steps: u32,
}

impl PathGeometry {
    /// Resolve path geometry from options. Step counts of zero are raised to
    /// one so every path terminates.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self {
            linear_start: Vec3::from_array(options.linear_start),
            linear_end: Vec3::from_array(options.linear_end),
            linear_steps: options.linear_steps.max(1),
            spiral_start: Vec3::from_array(options.spiral_start),
            spiral_end: Vec3::from_array(options.spiral_end),
            spiral_center: Vec3::from_array(options.spiral_center),
            spiral_radius: options.spiral_radius,
            spiral_steps: options.spiral_steps.max(1),
        }
    }

    fn linear_length(&self) -> f32 {
        (self.linear_end - self.linear_start).length()
    }

    fn spiral_length(&self) -> f32 {
        (self.spiral_end - self.spiral_start).length()
    }
}

/// Two-path camera state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPath {
    geometry: PathGeometry,
    kind: PathKind,
    reset: bool,
    /// Spiral azimuth in radians, kept in `[0, 2π]`.
    theta: f32,
}

impl CameraPath {
    /// Stopped state machine over the given geometry.
    #[must_use]
    pub fn new(geometry: PathGeometry) -> Self {
        Self {
            geometry,
            kind: PathKind::Stopped,
            reset: false,
            theta: FRAC_PI_2,
        }
    }

    /// Switch to `kind` and restart it from its first point on the next
    /// tick. Selecting the running path again restarts it.
    pub fn select(&mut self, kind: PathKind) {
        self.kind = kind;
        self.reset = kind != PathKind::Stopped;
    }

    /// Currently selected path.
    #[must_use]
    pub fn kind(&self) -> PathKind {
        self.kind
    }

    /// Spiral azimuth in radians.
    #[must_use]
    pub fn theta(&self) -> f32 {
        self.theta
    }

    /// Path geometry.
    #[must_use]
    pub fn geometry(&self) -> &PathGeometry {
        &self.geometry
    }

    /// `true` once the selected path has reached its end (or when stopped).
    #[must_use]
    pub fn is_finished(&self, camera: &Camera) -> bool {
        if self.reset {
            return false;
        }
        match self.kind {
            PathKind::Stopped => true,
            PathKind::Linear => !self.linear_has_room(camera),
            PathKind::Spiral => camera.eye.y <= self.geometry.spiral_end.y,
        }
    }

    /// Advance one step.
    ///
    /// Returns `true` when a path is selected, meaning the frame should be
    /// redrawn, even if the path has already reached its end.
    pub fn tick(&mut self, camera: &mut Camera) -> bool {
        match self.kind {
            PathKind::Stopped => false,
            PathKind::Linear => {
                self.tick_linear(camera);
                true
            }
            PathKind::Spiral => {
                self.tick_spiral(camera);
                true
            }
        }
    }

    /// The pan only moves along +X, so it also ends once `eye.x` reaches
    /// the end abscissa even when L1 differs from L0 in y or z.
    fn linear_has_room(&self, camera: &Camera) -> bool {
        let g = &self.geometry;
        camera.eye.x < g.linear_end.x
            && (camera.eye - g.linear_start).length() < g.linear_length()
    }

    fn tick_linear(&mut self, camera: &mut Camera) {
        let g = self.geometry;
        if self.reset {
            self.reset = false;
            camera.eye = g.linear_start;
        } else if self.linear_has_room(camera) {
            let step = g.linear_length() / g.linear_steps as f32;
            camera.eye.x = (camera.eye.x + step).min(g.linear_end.x);
        }
    }

    fn tick_spiral(&mut self, camera: &mut Camera) {
        let g = self.geometry;
        if self.reset {
            self.reset = false;
            camera.eye = g.spiral_start;
            self.theta = FRAC_PI_2;
        } else if camera.eye.y - g.spiral_end.y > 0.0 {
            let drop = g.spiral_length() / g.spiral_steps as f32;
            camera.eye.y = (camera.eye.y - drop).max(g.spiral_end.y);

            self.theta += TAU / g.spiral_steps as f32;
            if self.theta > TAU {
                self.theta -= TAU;
            }
            camera.eye.x = g.spiral_center.x + g.spiral_radius * self.theta.cos();
            camera.eye.z = g.spiral_center.z + g.spiral_radius * self.theta.sin();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (CameraPath, Camera) {
        let options = CameraOptions::default();
        (
            CameraPath::new(PathGeometry::from_options(&options)),
            Camera::from_options(&options),
        )
    }

    fn run(path: &mut CameraPath, camera: &mut Camera, ticks: u32) {
        for _ in 0..ticks {
            let _ = path.tick(camera);
        }
    }

    #[test]
    fn stopped_path_never_moves_or_redraws() {
        let (mut path, mut camera) = setup();
        let before = camera;
        assert!(!path.tick(&mut camera));
        assert_eq!(camera, before);
        assert!(path.is_finished(&camera));
    }

    #[test]
    fn first_linear_tick_snaps_to_start() {
        let (mut path, mut camera) = setup();
        camera.eye = Vec3::new(3.0, 3.0, 3.0);
        path.select(PathKind::Linear);
        assert!(!path.is_finished(&camera));
        assert!(path.tick(&mut camera));
        assert_eq!(camera.eye, Vec3::new(-6.0, 8.0, 6.0));
    }

    #[test]
    fn linear_path_reaches_end_and_holds() {
        let (mut path, mut camera) = setup();
        path.select(PathKind::Linear);
        run(&mut path, &mut camera, 1 + 2500);
        assert!((camera.eye.x - 0.0).abs() < 1e-2);
        assert!(!path.is_finished(&camera));

        run(&mut path, &mut camera, 2600);
        assert_eq!(camera.eye, Vec3::new(6.0, 8.0, 6.0));
        assert!(path.is_finished(&camera));

        // Still asks for redraws, but stays put.
        assert!(path.tick(&mut camera));
        assert_eq!(camera.eye, Vec3::new(6.0, 8.0, 6.0));
    }

    #[test]
    fn first_spiral_tick_snaps_to_start() {
        let (mut path, mut camera) = setup();
        path.select(PathKind::Spiral);
        let _ = path.tick(&mut camera);
        assert_eq!(camera.eye, Vec3::new(0.0, 5.0, 10.0));
        assert_eq!(path.theta(), FRAC_PI_2);
    }

    #[test]
    fn spiral_keeps_radius_while_descending() {
        let (mut path, mut camera) = setup();
        path.select(PathKind::Spiral);
        let _ = path.tick(&mut camera);
        let mut last_y = camera.eye.y;
        for _ in 0..500 {
            let _ = path.tick(&mut camera);
            let horizontal = Vec3::new(camera.eye.x, 0.0, camera.eye.z);
            assert!((horizontal.length() - 10.0).abs() < 1e-3);
            assert!(camera.eye.y < last_y);
            last_y = camera.eye.y;
        }
    }

    #[test]
    fn spiral_ends_at_end_height_after_one_revolution() {
        let (mut path, mut camera) = setup();
        path.select(PathKind::Spiral);
        run(&mut path, &mut camera, 1 + 10_100);
        assert_eq!(camera.eye.y, 0.0);
        assert!(path.is_finished(&camera));
        // One revolution from π/2 lands back near the start azimuth.
        assert!((camera.eye.x - 0.0).abs() < 0.1);
        assert!((camera.eye.z - 10.0).abs() < 0.1);
        assert!(path.theta() >= 0.0 && path.theta() <= TAU);
    }

    #[test]
    fn reselecting_restarts_path() {
        let (mut path, mut camera) = setup();
        path.select(PathKind::Spiral);
        run(&mut path, &mut camera, 300);
        assert!(camera.eye.y < 5.0);

        path.select(PathKind::Spiral);
        let _ = path.tick(&mut camera);
        assert_eq!(camera.eye, Vec3::new(0.0, 5.0, 10.0));

        path.select(PathKind::Linear);
        let _ = path.tick(&mut camera);
        assert_eq!(camera.eye, Vec3::new(-6.0, 8.0, 6.0));
        assert_eq!(path.kind(), PathKind::Linear);
    }

    #[test]
    fn zero_steps_are_clamped() {
        let options = CameraOptions {
            linear_steps: 0,
            spiral_steps: 0,
            ..CameraOptions::default()
        };
        let geometry = PathGeometry::from_options(&options);
        assert_eq!(geometry.linear_steps, 1);
        assert_eq!(geometry.spiral_steps, 1);

        let mut path = CameraPath::new(geometry);
        let mut camera = Camera::from_options(&options);
        path.select(PathKind::Linear);
        run(&mut path, &mut camera, 2);
        assert_eq!(camera.eye, Vec3::new(6.0, 8.0, 6.0));
    }

    #[test]
    fn linear_path_with_offset_end_still_finishes() {
        let options = CameraOptions {
            linear_end: [6.0, 10.0, 6.0],
            linear_steps: 100,
            ..CameraOptions::default()
        };
        let mut path = CameraPath::new(PathGeometry::from_options(&options));
        let mut camera = Camera::from_options(&options);
        path.select(PathKind::Linear);
        run(&mut path, &mut camera, 1 + 200);
        assert_eq!(camera.eye, Vec3::new(6.0, 8.0, 6.0));
        assert!(path.is_finished(&camera));
    }

    #[test]
    fn linear_path_with_no_x_travel_finishes_at_start() {
        let options = CameraOptions {
            linear_end: [-6.0, 12.0, 6.0],
            ..CameraOptions::default()
        };
        let mut path = CameraPath::new(PathGeometry::from_options(&options));
        let mut camera = Camera::from_options(&options);
        path.select(PathKind::Linear);
        let _ = path.tick(&mut camera);
        assert_eq!(camera.eye, Vec3::new(-6.0, 8.0, 6.0));
        assert!(path.is_finished(&camera));
    }
}
