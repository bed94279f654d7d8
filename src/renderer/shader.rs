//! WGSL loading and validation.
//!
//! Sources are parsed and validated with naga up front, so a broken shader
//! is reported as an initialization error with a readable diagnostic
//! instead of a wgpu validation panic at pipeline creation. The validated
//! module is handed to wgpu as naga IR, skipping a second parse.

use std::borrow::Cow;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::error::MolviewError;

/// The atom sphere shader.
pub const ATOM_SPHERE_WGSL: &str =
    include_str!("../../assets/shaders/atom_sphere.wgsl");

/// Required vertex entry point.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Required fragment entry point.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// A validated WGSL module exposing `vs_main` and `fs_main`.
#[derive(Debug, Clone)]
pub struct ShaderStages {
    module: naga::Module,
}

impl ShaderStages {
    /// Parse and validate `source`.
    ///
    /// # Errors
    ///
    /// [`MolviewError::Initialization`] on a parse or validation error, or
    /// when either entry point is missing.
    pub fn from_wgsl(source: &str) -> Result<Self, MolviewError> {
        let module = naga::front::wgsl::parse_str(source).map_err(|e| {
            MolviewError::Initialization(format!(
                "WGSL parse error: {}",
                e.emit_to_string(source)
            ))
        })?;

        let mut validator =
            Validator::new(ValidationFlags::all(), Capabilities::default());
        let _info = validator
            .validate(&module)
            .map_err(|e| {
                MolviewError::Initialization(format!(
                    "WGSL validation error: {e:?}"
                ))
            })?;

        let stages = Self { module };
        stages.require_entry(VERTEX_ENTRY, naga::ShaderStage::Vertex)?;
        stages.require_entry(FRAGMENT_ENTRY, naga::ShaderStage::Fragment)?;
        Ok(stages)
    }

    /// The built-in atom sphere shader.
    ///
    /// # Errors
    ///
    /// As [`ShaderStages::from_wgsl`].
    pub fn atom_sphere() -> Result<Self, MolviewError> {
        Self::from_wgsl(ATOM_SPHERE_WGSL)
    }

    /// The validated naga module.
    #[must_use]
    pub fn module(&self) -> &naga::Module {
        &self.module
    }

    /// Create the wgpu shader module from the validated IR.
    #[must_use]
    pub fn create_module(
        &self,
        device: &wgpu::Device,
        label: &str,
    ) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(self.module.clone())),
        })
    }

    fn require_entry(
        &self,
        name: &str,
        stage: naga::ShaderStage,
    ) -> Result<(), MolviewError> {
        let found = self
            .module
            .entry_points
            .iter()
            .any(|ep| ep.name == name && ep.stage == stage);
        if found {
            Ok(())
        } else {
            Err(MolviewError::Initialization(format!(
                "shader has no {stage:?} entry point `{name}`"
            )))
        }
    }
}
