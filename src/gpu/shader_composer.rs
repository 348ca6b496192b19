use std::{borrow::Cow, fmt};

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

/// WGSL composition failure.
#[derive(Debug)]
pub struct ShaderError {
    /// File path of the shader or module that failed.
    pub file_path: String,
    /// Rendered composer diagnostic.
    pub message: String,
}

impl ShaderError {
    fn new(file_path: &str, error: &ComposerError) -> Self {
        Self {
            file_path: file_path.to_owned(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to compose '{}': {}", self.file_path, self.message)
    }
}

impl std::error::Error for ShaderError {}

/// Shared module definition: source and the file path reported in errors.
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared WGSL modules, in dependency order.
const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
        file_path: "modules/lighting.wgsl",
    },
];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared modules are registered at construction time. Consuming shaders use
/// `#import tableau::module_name` to pull them in. The composer produces
/// `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Register every shared module.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if a shared module fails to parse.
    pub fn new() -> Result<Self, ShaderError> {
        let mut composer = Composer::default();
        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| ShaderError::new(m.file_path, &e))?;
        }
        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if composition or validation fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, ShaderError> {
        let naga_module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a wgpu
    /// shader module. Useful for testing shader composition without a GPU
    /// device.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, ShaderError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| ShaderError::new(file_path, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::solid::{SOLID_SHADER, SOLID_SHADER_PATH};

    #[test]
    fn solid_shader_composes() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(SOLID_SHADER, SOLID_SHADER_PATH)
            .unwrap_or_else(|e| panic!("{e}"));
        let entry_points: Vec<&str> =
            module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn composed_solid_shader_validates() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(SOLID_SHADER, SOLID_SHADER_PATH)
            .unwrap();
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        );
        let _ = validator.validate(&module).unwrap();
    }

    #[test]
    fn unresolved_import_reports_file_path() {
        let mut composer = ShaderComposer::new().unwrap();
        let source = "#import tableau::missing\n\
            @fragment\n\
            fn fs_main() -> @location(0) vec4<f32> {\n\
                let shade = tableau::missing::shade();\n\
                return vec4<f32>(shade, shade, shade, 1.0);\n\
            }\n";
        let err = composer.compose_naga(source, "broken.wgsl").unwrap_err();
        assert_eq!(err.file_path, "broken.wgsl");
        assert!(!err.message.is_empty());
    }
}
