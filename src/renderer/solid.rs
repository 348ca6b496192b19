//! Instanced solid-mesh pass.
//!
//! Every scene object is a flat-coloured triangle mesh. Meshes are uploaded
//! once into their own vertex buffers; per-object data (model-view, normal
//! matrix, colour) lives in one storage buffer that is rewritten each frame.
//! Objects sharing a mesh are drawn with a single instanced draw call.
//!
//! Bind group convention:
//! - group(0): storage buffer (instances)
//! - group(1): camera uniform
//! - group(2): lighting uniform

use std::{collections::BTreeMap, ops::Range};

use glam::{Mat3, Mat4};
use wgpu::util::DeviceExt;

use crate::{
    error::TableauError,
    gpu::{
        dynamic_buffer::TypedBuffer, render_context::RenderContext,
        shader_composer::ShaderComposer,
    },
    renderer::pipeline_util,
    scene::{
        mesh_gen::{self, MeshData, MeshError, MeshVertex},
        DrawItem, MeshKey,
    },
};

/// WGSL source of the solid pass.
pub(crate) const SOLID_SHADER: &str =
    include_str!("../../assets/shaders/raster/solid.wgsl");
/// Path reported in composition errors.
pub(crate) const SOLID_SHADER_PATH: &str = "raster/solid.wgsl";

/// Per-instance data for the solid pass.
/// Must match the WGSL `SolidInstance` struct layout exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SolidInstance {
    /// Object-to-eye transform, column-major.
    pub model_view: [[f32; 4]; 4],
    /// Inverse-transpose of the upper 3x3 of `model_view`; columns padded
    /// to 16 bytes as WGSL `mat3x3<f32>` requires.
    pub normal_matrix: [[f32; 4]; 3],
    /// RGBA colour.
    pub color: [f32; 4],
}

impl SolidInstance {
    /// Instance for one resolved draw item.
    #[must_use]
    pub fn from_item(item: &DrawItem) -> Self {
        let normal = normal_matrix(item.model_view);
        Self {
            model_view: item.model_view.to_cols_array_2d(),
            normal_matrix: [
                normal.x_axis.extend(0.0).to_array(),
                normal.y_axis.extend(0.0).to_array(),
                normal.z_axis.extend(0.0).to_array(),
            ],
            color: item.color.to_array(),
        }
    }
}

/// Matrix that keeps normals perpendicular under non-uniform scale.
fn normal_matrix(model_view: Mat4) -> Mat3 {
    let upper = Mat3::from_mat4(model_view);
    if upper.determinant().abs() <= f32::EPSILON {
        upper
    } else {
        upper.inverse().transpose()
    }
}

/// A contiguous run of instances that share one mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawBatch {
    /// Mesh drawn by this batch.
    pub mesh: MeshKey,
    /// Instance range inside the instance buffer.
    pub instances: Range<u32>,
}

/// Group draw items by mesh, keeping first-appearance order of meshes and
/// input order of items within each mesh.
#[must_use]
pub fn batch_items(items: &[DrawItem]) -> (Vec<SolidInstance>, Vec<DrawBatch>) {
    let mut order: Vec<MeshKey> = Vec::new();
    for item in items {
        if !order.contains(&item.mesh) {
            order.push(item.mesh);
        }
    }

    let mut instances = Vec::with_capacity(items.len());
    let mut batches = Vec::with_capacity(order.len());
    for mesh in order {
        let start = instances.len() as u32;
        instances.extend(
            items
                .iter()
                .filter(|item| item.mesh == mesh)
                .map(SolidInstance::from_item),
        );
        batches.push(DrawBatch {
            mesh,
            instances: start..instances.len() as u32,
        });
    }
    (instances, batches)
}

/// Generate the CPU mesh for a key. Spheres are unit radius; the scene
/// scales them.
///
/// # Errors
///
/// Returns [`MeshError`] for invalid sphere tessellation.
pub fn build_mesh(key: MeshKey) -> Result<MeshData, MeshError> {
    match key {
        MeshKey::Cube => Ok(mesh_gen::solid_cube()),
        MeshKey::Sphere { slices, stacks } => {
            mesh_gen::solid_sphere(1.0, slices, stacks)
        }
    }
}

/// Meshes resident for the current scene, keyed by [`MeshKey`].
#[derive(Debug)]
pub struct MeshCache<M> {
    entries: BTreeMap<MeshKey, M>,
}

impl<M> Default for MeshCache<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> MeshCache<M> {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Make the cache hold exactly `keys`. Entries already present are
    /// kept, missing ones come from `build`, and the rest are dropped.
    ///
    /// # Errors
    ///
    /// Propagates the first `build` error; the cache is then unchanged.
    pub fn sync<E>(
        &mut self,
        keys: &[MeshKey],
        mut build: impl FnMut(MeshKey) -> Result<M, E>,
    ) -> Result<(), E> {
        let mut built = Vec::new();
        for &key in keys {
            if !self.entries.contains_key(&key)
                && !built.iter().any(|(k, _)| *k == key)
            {
                built.push((key, build(key)?));
            }
        }
        self.entries.retain(|key, _| {
            let keep = keys.contains(key);
            if !keep {
                log::debug!("dropping cached mesh {key:?}");
            }
            keep
        });
        self.entries.extend(built);
        Ok(())
    }

    /// Cached entry for `key`.
    #[must_use]
    pub fn get(&self, key: &MeshKey) -> Option<&M> {
        self.entries.get(key)
    }

    /// Keys currently cached, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &MeshKey> {
        self.entries.keys()
    }

    /// Number of cached meshes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An uploaded, non-indexed triangle list.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// Pipeline, mesh cache and instance buffer for solid geometry.
pub struct SolidRenderer {
    pipeline: wgpu::RenderPipeline,
    meshes: MeshCache<GpuMesh>,
    instance_buffer: TypedBuffer<SolidInstance>,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    batches: Vec<DrawBatch>,
}

impl SolidRenderer {
    /// Build the pipeline against the camera and lighting layouts.
    ///
    /// # Errors
    ///
    /// Returns [`TableauError::Shader`] if the WGSL fails to compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, TableauError> {
        let instance_buffer = TypedBuffer::new_with_data(
            &context.device,
            "Solid Instance Buffer",
            &[],
            wgpu::BufferUsages::STORAGE,
        );
        let bind_group_layout = Self::create_bind_group_layout(&context.device);
        let bind_group = Self::create_bind_group(
            &context.device,
            &bind_group_layout,
            &instance_buffer,
        );

        let shader = shader_composer.compose(
            &context.device,
            "Solid Shader",
            SOLID_SHADER,
            SOLID_SHADER_PATH,
        )?;
        let pipeline = Self::create_pipeline(
            context,
            &shader,
            &[&bind_group_layout, camera_layout, lighting_layout],
        );

        Ok(Self {
            pipeline,
            meshes: MeshCache::new(),
            instance_buffer,
            bind_group_layout,
            bind_group,
            batches: Vec::new(),
        })
    }

    fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Solid Instance Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &TypedBuffer<SolidInstance>,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.buffer().as_entire_binding(),
            }],
            label: Some("Solid Instance Bind Group"),
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        shader: &wgpu::ShaderModule,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
    ) -> wgpu::RenderPipeline {
        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Solid Pipeline Layout"),
                bind_group_layouts,
                push_constant_ranges: &[],
            },
        );

        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Solid Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[MeshVertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::surface_target(context.format()),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    /// Upload every mesh in `keys` that is not resident yet and release
    /// the ones `keys` no longer lists.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError`] if a sphere key has invalid tessellation; the
    /// resident meshes are then left as they were.
    pub fn sync_meshes(
        &mut self,
        device: &wgpu::Device,
        keys: &[MeshKey],
    ) -> Result<(), MeshError> {
        self.meshes.sync(keys, |key| {
            let data = build_mesh(key)?;
            log::debug!(
                "uploading {key:?}: {} vertices, {} triangles",
                data.vertex_count(),
                data.triangle_count()
            );
            let vertex_buffer =
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{key:?} Vertex Buffer")),
                    contents: bytemuck::cast_slice(&data.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            Ok(GpuMesh {
                vertex_buffer,
                vertex_count: data.vertex_count(),
            })
        })
    }

    /// Upload this frame's draw items.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        items: &[DrawItem],
    ) {
        let (instances, batches) = batch_items(items);
        if self.instance_buffer.write(device, queue, &instances) {
            self.bind_group = Self::create_bind_group(
                device,
                &self.bind_group_layout,
                &self.instance_buffer,
            );
        }
        self.batches = batches;
    }

    /// Record one instanced draw per mesh batch.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        lighting_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.batches.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_bind_group(1, camera_bind_group, &[]);
        render_pass.set_bind_group(2, lighting_bind_group, &[]);

        for batch in &self.batches {
            let Some(mesh) = self.meshes.get(&batch.mesh) else {
                log::error!("no GPU mesh for {:?}; skipping batch", batch.mesh);
                continue;
            };
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.draw(0..mesh.vertex_count, batch.instances.clone());
        }
    }

    /// Number of meshes resident on the GPU.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Instances written by the last [`prepare`](Self::prepare).
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instance_buffer.count()
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;
    use crate::scene::Scene;

    #[test]
    fn instance_matches_wgsl_size() {
        assert_eq!(size_of::<SolidInstance>(), 128);
    }

    #[test]
    fn scene_batches_cubes_then_sphere() {
        let scene = Scene::new(20, 10);
        let items = scene.draw_items(Mat4::IDENTITY).unwrap();
        let (instances, batches) = batch_items(&items);

        assert_eq!(instances.len(), 6);
        assert_eq!(
            batches,
            vec![
                DrawBatch {
                    mesh: MeshKey::Cube,
                    instances: 0..5
                },
                DrawBatch {
                    mesh: MeshKey::Sphere {
                        slices: 20,
                        stacks: 10
                    },
                    instances: 5..6
                },
            ]
        );
        // Floor leads the cube batch; blocks follow in scene order.
        assert_eq!(instances[0].color, [0.9, 0.9, 0.9, 0.9]);
        assert_eq!(instances[1].color, [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(instances[5].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let item = DrawItem {
            mesh: MeshKey::Cube,
            model_view: Mat4::from_scale(Vec3::new(10.0, 0.01, 10.0)),
            color: Vec4::ONE,
        };
        let instance = SolidInstance::from_item(&item);
        let cols = instance.normal_matrix;
        let normal = Mat3::from_cols(
            Vec3::new(cols[0][0], cols[0][1], cols[0][2]),
            Vec3::new(cols[1][0], cols[1][1], cols[1][2]),
            Vec3::new(cols[2][0], cols[2][1], cols[2][2]),
        );
        // The top face normal stays vertical after the flattening scale.
        let up = (normal * Vec3::Y).normalize();
        assert!((up - Vec3::Y).length() < 1e-5);
        // A slanted normal is bent towards the squashed axis.
        let slanted = (normal * Vec3::new(1.0, 1.0, 0.0)).normalize();
        assert!(slanted.y > slanted.x);
        for col in cols {
            assert_eq!(col[3], 0.0);
        }
    }

    #[test]
    fn build_mesh_uses_key_tessellation() {
        assert_eq!(build_mesh(MeshKey::Cube).unwrap().vertex_count(), 36);
        let sphere = build_mesh(MeshKey::Sphere {
            slices: 20,
            stacks: 10,
        })
        .unwrap();
        assert_eq!(sphere.vertex_count(), 1080);
        assert!(build_mesh(MeshKey::Sphere {
            slices: 1,
            stacks: 1
        })
        .is_err());
    }

    #[test]
    fn empty_items_produce_no_batches() {
        let (instances, batches) = batch_items(&[]);
        assert!(instances.is_empty());
        assert!(batches.is_empty());
    }

    #[test]
    fn mesh_cache_builds_missing_and_drops_stale() {
        let coarse = MeshKey::Sphere {
            slices: 20,
            stacks: 10,
        };
        let fine = MeshKey::Sphere {
            slices: 40,
            stacks: 20,
        };
        let mut cache: MeshCache<u32> = MeshCache::new();
        let mut builds = Vec::new();
        cache
            .sync::<MeshError>(&[MeshKey::Cube, coarse], |key| {
                builds.push(key);
                Ok(build_mesh(key)?.vertex_count())
            })
            .unwrap();
        assert_eq!(builds, vec![MeshKey::Cube, coarse]);

        builds.clear();
        cache
            .sync::<MeshError>(&[MeshKey::Cube, fine], |key| {
                builds.push(key);
                Ok(build_mesh(key)?.vertex_count())
            })
            .unwrap();
        // The cube is reused; the old sphere is released.
        assert_eq!(builds, vec![fine]);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&coarse).is_none());
        assert_eq!(cache.get(&fine), Some(&sphere_count(40, 20)));
    }

    #[test]
    fn failed_mesh_sync_keeps_cache() {
        let coarse = MeshKey::Sphere {
            slices: 20,
            stacks: 10,
        };
        let mut cache: MeshCache<u32> = MeshCache::new();
        cache
            .sync(&[MeshKey::Cube, coarse], |key| {
                build_mesh(key).map(|m| m.vertex_count())
            })
            .unwrap();

        let bad = MeshKey::Sphere {
            slices: 2,
            stacks: 2,
        };
        let err = cache
            .sync(&[MeshKey::Cube, bad], |key| {
                build_mesh(key).map(|m| m.vertex_count())
            })
            .unwrap_err();
        assert!(matches!(err, MeshError::DegenerateSphere { .. }));
        let keys: Vec<MeshKey> = cache.keys().copied().collect();
        assert_eq!(keys, vec![MeshKey::Cube, coarse]);
    }

    fn sphere_count(slices: u32, stacks: u32) -> u32 {
        mesh_gen::sphere_vertex_count(slices, stacks).unwrap()
    }
}
