//! Procedural triangle meshes: the axis-aligned unit cube and the
//! slice/stack tessellated sphere.
//!
//! Both meshes are non-indexed triangle lists. Positions carry `w = 1`,
//! normals carry `w = 0`, so the same vertex layout feeds a single pipeline.

use std::{f32::consts::PI, fmt};

use glam::Vec3;

/// Vertex layout shared by every solid mesh.
/// Must match the WGSL `VertexInput` struct layout exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position (xyz), w = 1
    pub position: [f32; 4],
    /// Object-space unit normal (xyz), w = 0
    pub normal: [f32; 4],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

    /// Vertex buffer layout for `@location(0) position, @location(1) normal`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.extend(1.0).to_array(),
            normal: normal.extend(0.0).to_array(),
        }
    }
}

/// CPU-side triangle list ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Three consecutive vertices per triangle.
    pub vertices: Vec<MeshVertex>,
}

impl MeshData {
    /// Number of vertices (the draw count).
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        u32::try_from(self.vertices.len()).unwrap_or(u32::MAX)
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Invalid tessellation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshError {
    /// Too few slices or stacks to enclose a volume.
    DegenerateSphere {
        /// Requested azimuthal subdivisions.
        slices: u32,
        /// Requested polar subdivisions.
        stacks: u32,
    },
    /// Radius is zero, negative, or not finite.
    InvalidRadius(f32),
    /// Tessellation would exceed [`MAX_SPHERE_VERTICES`].
    TooManyVertices {
        /// Requested azimuthal subdivisions.
        slices: u32,
        /// Requested polar subdivisions.
        stacks: u32,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateSphere { slices, stacks } => write!(
                f,
                "sphere needs at least 3 slices and 2 stacks, got \
                 {slices}x{stacks}"
            ),
            Self::InvalidRadius(r) => write!(f, "invalid sphere radius {r}"),
            Self::TooManyVertices { slices, stacks } => write!(
                f,
                "sphere {slices}x{stacks} exceeds {MAX_SPHERE_VERTICES} vertices"
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// Largest sphere [`solid_sphere`] will build. At 32 bytes per vertex this
/// fills wgpu's default 256 MiB buffer limit.
pub const MAX_SPHERE_VERTICES: u32 = 1 << 23;

/// Vertex count produced by [`solid_sphere`] for the given subdivisions, or
/// `None` if it does not fit in a `u32`.
#[must_use]
pub const fn sphere_vertex_count(slices: u32, stacks: u32) -> Option<u32> {
    let Some(quads) = slices.checked_mul(stacks) else {
        return None;
    };
    let Some(cells) = quads.checked_sub(slices) else {
        return None;
    };
    cells.checked_mul(6)
}

/// Unit cube centred at the origin, sides aligned with the axes.
///
/// 36 vertices, flat-shaded: faces in order front (+Z), right (+X),
/// back (-Z), left (-X), top (+Y), bottom (-Y).
#[must_use]
pub fn solid_cube() -> MeshData {
    let corners = [
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(-0.5, 0.5, 0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(-0.5, -0.5, 0.5),
        Vec3::new(-0.5, -0.5, -0.5),
    ];

    // Two triangles per face: (a, b, c) and (a, c, d).
    let faces: [([usize; 4], Vec3); 6] = [
        ([0, 4, 6, 2], Vec3::Z),
        ([1, 0, 2, 3], Vec3::X),
        ([5, 1, 3, 7], Vec3::NEG_Z),
        ([4, 5, 7, 6], Vec3::NEG_X),
        ([4, 0, 1, 5], Vec3::Y),
        ([6, 7, 3, 2], Vec3::NEG_Y),
    ];

    let vertices = faces
        .iter()
        .flat_map(|&([a, b, c, d], normal)| {
            [a, b, c, a, c, d]
                .map(|i| MeshVertex::new(corners[i], normal))
        })
        .collect();

    MeshData { vertices }
}

/// Slice/stack tessellated sphere centred at the origin.
///
/// `slices` subdivide the azimuth over 360 degrees, `stacks` subdivide the
/// polar angle over 180 degrees, measured from +Z. The polar caps are fans of
/// single triangles; every other band is a strip of quads split into two
/// triangles. Produces [`sphere_vertex_count`] vertices.
///
/// # Errors
///
/// Returns [`MeshError::DegenerateSphere`] for fewer than 3 slices or 2
/// stacks, [`MeshError::InvalidRadius`] for a non-positive radius and
/// [`MeshError::TooManyVertices`] above [`MAX_SPHERE_VERTICES`].
pub fn solid_sphere(
    radius: f32,
    slices: u32,
    stacks: u32,
) -> Result<MeshData, MeshError> {
    if slices < 3 || stacks < 2 {
        return Err(MeshError::DegenerateSphere { slices, stacks });
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::InvalidRadius(radius));
    }
    let count = sphere_vertex_count(slices, stacks)
        .filter(|&n| n <= MAX_SPHERE_VERTICES)
        .ok_or(MeshError::TooManyVertices { slices, stacks })?;

    let phi_step = 2.0 * PI / slices as f32;
    let rho_step = PI / stacks as f32;
    let vertex = |s: u32, t: u32| {
        let phi = s as f32 * phi_step;
        let rho = t as f32 * rho_step;
        let normal = Vec3::new(
            phi.sin() * rho.sin(),
            phi.cos() * rho.sin(),
            rho.cos(),
        );
        MeshVertex::new(normal * radius, normal)
    };

    let mut vertices = Vec::with_capacity(count as usize);

    for s in 0..slices {
        for t in 1..stacks - 1 {
            // v1 *--* v3
            //    | /|
            //    |/ |
            // v2 *--* v4
            let v1 = vertex(s, t);
            let v2 = vertex(s, t + 1);
            let v3 = vertex(s + 1, t);
            let v4 = vertex(s + 1, t + 1);
            vertices.extend_from_slice(&[v1, v2, v3, v3, v2, v4]);
        }
    }

    // Top cap: v1 and v3 coincide at the pole.
    for s in 0..slices {
        vertices.extend_from_slice(&[
            vertex(s, 0),
            vertex(s, 1),
            vertex(s + 1, 1),
        ]);
    }

    // Bottom cap: v2 and v4 coincide at the pole.
    let t = stacks - 1;
    for s in 0..slices {
        vertices.extend_from_slice(&[
            vertex(s, t),
            vertex(s, t + 1),
            vertex(s + 1, t),
        ]);
    }

    Ok(MeshData { vertices })
}
