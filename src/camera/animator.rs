//! Fixed-rate driver for [`CameraPath`].
//!
//! Frames arrive at whatever rate the display allows; the path itself is
//! defined in ticks. The animator accumulates frame time and runs whole ticks
//! so path speed does not depend on frame rate.

use super::{
    core::Camera,
    path::{CameraPath, PathGeometry, PathKind},
};
use crate::options::CameraOptions;

/// Camera plus its path state machine and tick accumulator.
#[derive(Debug, Clone)]
pub struct CameraAnimator {
    camera: Camera,
    path: CameraPath,
    ticks_per_second: f32,
    max_ticks_per_frame: u32,
    accumulator: f32,
}

impl CameraAnimator {
    /// Stopped animator with the camera at the start of the linear path.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            camera: Camera::from_options(options),
            path: CameraPath::new(PathGeometry::from_options(options)),
            ticks_per_second: options.ticks_per_second.max(1.0),
            max_ticks_per_frame: options.max_ticks_per_frame.max(1),
            accumulator: 0.0,
        }
    }

    /// Start (or restart) a path.
    pub fn select(&mut self, kind: PathKind) {
        log::info!("camera path: {kind:?}");
        self.path.select(kind);
        self.accumulator = 0.0;
    }

    /// Advance by `dt` seconds of wall-clock time.
    ///
    /// Returns `true` if the camera moved.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.path.kind() == PathKind::Stopped {
            return false;
        }
        let was_finished = self.path.is_finished(&self.camera);

        self.accumulator += dt.max(0.0) * self.ticks_per_second;
        let due = self.accumulator.floor();
        self.accumulator -= due;
        let ticks = (due as u32).min(self.max_ticks_per_frame);

        let before = self.camera.eye;
        for _ in 0..ticks {
            let _ = self.path.tick(&mut self.camera);
        }

        if !was_finished && self.path.is_finished(&self.camera) {
            log::debug!(
                "camera path {:?} finished at {}",
                self.path.kind(),
                self.camera.eye
            );
        }
        self.camera.eye != before
    }

    /// `true` while the selected path still has ground to cover.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.path.is_finished(&self.camera)
    }

    /// The camera being animated.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The path state machine.
    #[must_use]
    pub fn path(&self) -> &CameraPath {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn stopped_animator_ignores_time() {
        let mut animator = CameraAnimator::new(&CameraOptions::default());
        let start = animator.camera().eye;
        assert!(!animator.update(1.0));
        assert_eq!(animator.camera().eye, start);
        assert!(!animator.is_animating());
    }

    #[test]
    fn linear_speed_follows_tick_rate() {
        let mut animator = CameraAnimator::new(&CameraOptions::default());
        animator.select(PathKind::Linear);
        assert!(animator.is_animating());

        // 1000 ticks/s at 12 units / 5000 ticks = 2.4 units per second,
        // minus the first tick spent snapping to the start.
        for _ in 0..10 {
            let _ = animator.update(0.1);
        }
        let expected = -6.0 + 999.0 * 12.0 / 5000.0;
        assert!((animator.camera().eye.x - expected).abs() < 0.01);
    }

    #[test]
    fn fractional_frames_accumulate() {
        let mut animator = CameraAnimator::new(&CameraOptions::default());
        animator.select(PathKind::Linear);
        // Half a tick per frame: only every second frame runs a tick.
        assert!(!animator.update(0.0005));
        assert!(!animator.update(0.0));
        let _ = animator.update(0.0005);
        assert_eq!(animator.camera().eye, Vec3::new(-6.0, 8.0, 6.0));
    }

    #[test]
    fn ticks_per_frame_are_capped() {
        let options = CameraOptions {
            max_ticks_per_frame: 10,
            ..CameraOptions::default()
        };
        let mut animator = CameraAnimator::new(&options);
        animator.select(PathKind::Linear);
        let _ = animator.update(5.0);
        let expected = -6.0 + 9.0 * 12.0 / 5000.0;
        assert!((animator.camera().eye.x - expected).abs() < 1e-4);
    }

    #[test]
    fn spiral_finishes_and_stops_animating() {
        let mut animator = CameraAnimator::new(&CameraOptions::default());
        animator.select(PathKind::Spiral);
        for _ in 0..60 {
            let _ = animator.update(0.25);
        }
        assert!(!animator.is_animating());
        assert_eq!(animator.camera().eye.y, 0.0);
        assert!(!animator.update(0.25));
    }
}
