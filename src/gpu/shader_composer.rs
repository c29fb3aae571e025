//! WGSL shader composition with `#import` support via naga-oil.

use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared height-field WGSL module at construction time.
/// Consuming shaders use `#import swell::height_field` to pull in the wave
/// formula and height-lookup helpers, so the compute and raster stages share
/// one definition of the height sampling logic. The composer produces
/// `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition: (source, file_path).
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

impl ShaderComposer {
    /// Build a composer with all shared modules registered.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError`] if a shared module fails to parse.
    pub fn new() -> Result<Self, Box<ComposerError>> {
        let mut composer = Composer::default();

        let modules: &[ModuleDef] = &[ModuleDef {
            source: include_str!("../../assets/shaders/modules/height_field.wgsl"),
            file_path: "modules/height_field.wgsl",
        }];

        for m in modules {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(Box::new)?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`ComposerError`] if the source fails to compose.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, Box<ComposerError>> {
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
    /// Returns [`ComposerError`] if the source fails to compose.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, Box<ComposerError>> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shader source definitions for all composable shaders in the project.
    /// Each entry is (source, file_path).
    fn all_shader_sources() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                include_str!("../../assets/shaders/compute/wave_field.wgsl"),
                "wave_field.wgsl",
            ),
            (
                include_str!("../../assets/shaders/raster/surface.wgsl"),
                "surface.wgsl",
            ),
        ]
    }

    #[test]
    fn test_all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, file_path) in all_shader_sources() {
            let _ = composer.compose_naga(source, file_path).unwrap_or_else(|e| {
                panic!("Shader '{}' failed to compose: {}", file_path, e)
            });
        }
    }
}
