//! Crate-level error types.

use std::fmt;

use crate::{
    gpu::{render_context::GpuInitError, shader_composer::ShaderError},
    scene::mesh_gen::MeshError,
    util::matrix_stack::MatrixStackError,
};

/// Errors produced by the tableau crate.
#[derive(Debug)]
pub enum TableauError {
    /// GPU context initialization failure.
    Gpu(GpuInitError),
    /// WGSL composition failure.
    Shader(ShaderError),
    /// Procedural mesh generation was given invalid parameters.
    Mesh(MeshError),
    /// Unbalanced push/pop while composing scene transforms.
    Transform(MatrixStackError),
    /// Swapchain frame acquisition failure.
    Surface(wgpu::SurfaceError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for TableauError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(e) => write!(f, "shader error: {e}"),
            Self::Mesh(e) => write!(f, "mesh error: {e}"),
            Self::Transform(e) => write!(f, "transform error: {e}"),
            Self::Surface(e) => write!(f, "surface error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for TableauError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Shader(e) => Some(e),
            Self::Mesh(e) => Some(e),
            Self::Transform(e) => Some(e),
            Self::Surface(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) | Self::Viewer(_) => None,
        }
    }
}

impl From<GpuInitError> for TableauError {
    fn from(e: GpuInitError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ShaderError> for TableauError {
    fn from(e: ShaderError) -> Self {
        Self::Shader(e)
    }
}

impl From<MeshError> for TableauError {
    fn from(e: MeshError) -> Self {
        Self::Mesh(e)
    }
}

impl From<MatrixStackError> for TableauError {
    fn from(e: MatrixStackError) -> Self {
        Self::Transform(e)
    }
}

impl From<wgpu::SurfaceError> for TableauError {
    fn from(e: wgpu::SurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl From<std::io::Error> for TableauError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
