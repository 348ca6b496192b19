use glam::Vec4;
use wgpu::util::DeviceExt;

use super::{
    animator::CameraAnimator,
    core::{CameraUniform, Projection},
    path::PathKind,
};
use crate::{
    gpu::render_context::RenderContext,
    options::{CameraOptions, ProjectionOptions},
};

/// Owns the animated camera, the projection, and the GPU uniform that
/// carries them to the shaders.
pub struct CameraController {
    /// Animated look-at camera.
    pub animator: CameraAnimator,
    /// Orthographic projection.
    pub projection: Projection,
    /// CPU copy of the uniform.
    pub uniform: CameraUniform,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (group 1 in the solid pipeline).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over [`Self::buffer`].
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create the camera at the linear path start and upload its uniform.
    pub fn new(
        context: &RenderContext,
        camera_options: &CameraOptions,
        projection_options: &ProjectionOptions,
    ) -> Self {
        let animator = CameraAnimator::new(camera_options);
        let mut projection = Projection::from_options(projection_options);
        let (width, height) = context.size();
        projection.resize(width, height);

        let uniform = CameraUniform::new();

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Camera Bind Group"),
            });

        Self {
            animator,
            projection,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Start (or restart) a scripted path.
    pub fn select_path(&mut self, kind: PathKind) {
        self.animator.select(kind);
    }

    /// Advance the path by `dt` seconds. Returns `true` if the eye moved.
    pub fn update(&mut self, dt: f32) -> bool {
        self.animator.update(dt)
    }

    /// Recompute the uniform from the current camera and upload it.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue, light_world: Vec4) {
        let view = self.animator.camera().view_matrix();
        self.uniform.update(&self.projection, view, light_world);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }

    /// Track the viewport aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }
}
