use glam::{Mat4, Vec3, Vec4};

use crate::options::{CameraOptions, ProjectionOptions};

/// Look-at camera: eye position, target and up direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
}

impl Camera {
    /// Camera at the start of the linear path, looking at the configured
    /// target.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self {
            eye: Vec3::from_array(options.linear_start),
            target: Vec3::from_array(options.target),
            up: Vec3::from_array(options.up),
        }
    }

    /// Right-handed world-to-eye matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Orthographic projection with an optional aspect correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
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
    /// Scale the horizontal extent by the viewport aspect.
    pub preserve_aspect: bool,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
}

impl Projection {
    /// Projection from options with a square viewport.
    #[must_use]
    pub fn from_options(options: &ProjectionOptions) -> Self {
        Self {
            left: options.left,
            right: options.right,
            bottom: options.bottom,
            top: options.top,
            near: options.near,
            far: options.far,
            preserve_aspect: options.preserve_aspect,
            aspect: 1.0,
        }
    }

    /// Record the new viewport size. Ignores zero-sized dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Eye-to-clip matrix using the wgpu `[0, 1]` depth range.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let (left, right) = if self.preserve_aspect {
            let box_aspect = (self.right - self.left) / (self.top - self.bottom);
            let stretch = self.aspect / box_aspect;
            let centre = 0.5 * (self.left + self.right);
            let half = 0.5 * (self.right - self.left) * stretch;
            (centre - half, centre + half)
        } else {
            (self.left, self.right)
        };
        Mat4::orthographic_rh(
            left,
            right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the projection and eye-space light.
pub struct CameraUniform {
    /// Eye-to-clip projection matrix.
    pub projection: [[f32; 4]; 4],
    /// Light position transformed into eye space (`w = 0` = directional).
    pub light_eye: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Identity projection and a light shining down the view axis.
    pub fn new() -> Self {
        Self {
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            light_eye: [0.0, 0.0, 1.0, 0.0],
        }
    }

    /// Refresh from the projection, the current view and the world-space
    /// light position.
    pub fn update(
        &mut self,
        projection: &Projection,
        view: Mat4,
        light_world: Vec4,
    ) {
        self.projection = projection.matrix().to_cols_array_2d();
        self.light_eye = (view * light_world).to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_starts_at_linear_start() {
        let camera = Camera::from_options(&CameraOptions::default());
        assert_eq!(camera.eye, Vec3::new(-6.0, 8.0, 6.0));
        assert_eq!(camera.target, Vec3::new(0.0, 0.75, 0.0));
        assert_eq!(camera.up, Vec3::Y);
    }

    #[test]
    fn view_maps_target_onto_negative_z_axis() {
        let camera = Camera::from_options(&CameraOptions::default());
        let target_eye = camera.view_matrix().transform_point3(camera.target);
        let distance = (camera.eye - camera.target).length();
        assert!(target_eye.x.abs() < 1e-5);
        assert!(target_eye.y.abs() < 1e-5);
        assert!((target_eye.z + distance).abs() < 1e-4);
    }

    #[test]
    fn orthographic_box_maps_to_clip_volume() {
        let projection = Projection::from_options(&ProjectionOptions::default());
        let m = projection.matrix();
        let near_corner = m.project_point3(Vec3::new(-4.0, -4.0, -1.0));
        let far_corner = m.project_point3(Vec3::new(4.0, 4.0, -20.0));
        assert!((near_corner - Vec3::new(-1.0, -1.0, 0.0)).length() < 1e-5);
        assert!((far_corner - Vec3::new(1.0, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn resize_without_preserve_aspect_keeps_box() {
        let mut projection =
            Projection::from_options(&ProjectionOptions::default());
        let before = projection.matrix();
        projection.resize(1024, 512);
        assert_eq!(projection.matrix(), before);
    }

    #[test]
    fn preserve_aspect_widens_horizontal_extent() {
        let mut projection = Projection::from_options(&ProjectionOptions {
            preserve_aspect: true,
            ..ProjectionOptions::default()
        });
        projection.resize(1024, 512);
        let edge = projection.matrix().project_point3(Vec3::new(8.0, 4.0, -1.0));
        assert!((edge.x - 1.0).abs() < 1e-5);
        assert!((edge.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut projection =
            Projection::from_options(&ProjectionOptions::default());
        projection.resize(0, 300);
        assert_eq!(projection.aspect, 1.0);
    }

    #[test]
    fn uniform_carries_eye_space_light_direction() {
        let camera = Camera::from_options(&CameraOptions::default());
        let projection =
            Projection::from_options(&ProjectionOptions::default());
        let mut uniform = CameraUniform::new();
        let light = Vec4::new(10.0, 10.0, 10.0, 0.0);
        uniform.update(&projection, camera.view_matrix(), light);
        // Directional lights ignore the view translation.
        assert_eq!(uniform.light_eye[3], 0.0);
        let len = Vec4::from_array(uniform.light_eye).length();
        assert!((len - light.length()).abs() < 1e-3);
    }
}
