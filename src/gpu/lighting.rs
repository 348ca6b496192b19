use glam::Vec4;
use wgpu::util::DeviceExt;

use crate::{gpu::render_context::RenderContext, options::LightingOptions};

/// Shading weights shared by the solid shader.
/// NOTE: Must match WGSL `LightingUniform` layout exactly (16 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Ambient term added to every fragment.
    pub ambient: f32,
    /// Diffuse weight of the light.
    pub diffuse: f32,
    pub(crate) _pad: [f32; 2],
}

impl LightingUniform {
    /// Uniform from options.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            ambient: options.ambient,
            diffuse: options.diffuse,
            _pad: [0.0; 2],
        }
    }
}

/// Lighting uniform buffer plus the world-space light it is paired with.
pub struct Lighting {
    /// CPU copy of the uniform.
    pub uniform: LightingUniform,
    /// World-space light position (`w = 0` = directional). Moved into eye
    /// space through the camera uniform every frame.
    pub light_world: Vec4,
    /// GPU uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout (group 2 in the solid pipeline).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over [`Self::buffer`].
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Upload the lighting uniform described by `options`.
    pub fn new(context: &RenderContext, options: &LightingOptions) -> Self {
        let uniform = LightingUniform::from_options(options);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
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
                label: Some("Lighting Bind Group"),
            });

        Self {
            uniform,
            light_world: Vec4::from_array(options.light_position),
            buffer,
            layout,
            bind_group,
        }
    }

    /// Apply new options and re-upload the uniform.
    pub fn apply_options(&mut self, queue: &wgpu::Queue, options: &LightingOptions) {
        self.uniform = LightingUniform::from_options(options);
        self.light_world = Vec4::from_array(options.light_position);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
