//! The atom sphere render pipeline.

use wgpu::PipelineCompilationOptions;

use crate::error::MolviewError;
use crate::frame::uniforms::FrameUniforms;
use crate::renderer::pipeline_util;
use crate::renderer::shader::{ShaderStages, FRAGMENT_ENTRY, VERTEX_ENTRY};

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];
const TEXCOORD_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![1 => Float32x2];
const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![2 => Float32x3];

/// Per-vertex buffer layouts: position @0, texcoord @1, normal @2, each in
/// its own tightly packed buffer slot.
#[must_use]
pub fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    [
        wgpu::VertexBufferLayout {
            array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: size_of::<[f32; 2]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &TEXCOORD_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &NORMAL_ATTRIBUTES,
        },
    ]
}

/// Pipeline plus the bind group layouts its groups are created against.
///
/// Group 0 holds the per-frame uniforms (dynamic offset into the uniform
/// ring), group 1 the read-only instance storage buffer.
pub struct AtomPipeline {
    /// The render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Layout of bind group 0.
    pub frame_layout: wgpu::BindGroupLayout,
    /// Layout of bind group 1.
    pub instance_layout: wgpu::BindGroupLayout,
    sample_count: u32,
}

impl AtomPipeline {
    /// Build the pipeline for `format` at `sample_count` MSAA samples.
    ///
    /// # Errors
    ///
    /// [`MolviewError::Initialization`] if wgpu reports a validation error
    /// while creating any of the objects.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        sample_count: u32,
        stages: &ShaderStages,
    ) -> Result<Self, MolviewError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let frame_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Uniforms Layout"),
                entries: &[pipeline_util::dynamic_uniform_buffer(
                    0,
                    size_of::<FrameUniforms>() as u64,
                )],
            });
        let instance_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Atom Instances Layout"),
                entries: &[pipeline_util::read_only_storage_buffer(0)],
            });

        let shader = stages.create_module(device, "Atom Sphere Shader");
        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Atom Sphere Pipeline Layout"),
                bind_group_layouts: &[&frame_layout, &instance_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Atom Sphere Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(VERTEX_ENTRY),
                    buffers: &vertex_layouts(),
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(FRAGMENT_ENTRY),
                    targets: &pipeline_util::color_target(format),
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: pipeline_util::culled_triangle_list(),
                depth_stencil: Some(pipeline_util::depth_stencil_state()),
                multisample: wgpu::MultisampleState {
                    count: sample_count,
                    ..Default::default()
                },
                multiview: None,
                cache: None,
            });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            log::error!("atom pipeline creation failed: {error}");
            return Err(MolviewError::Initialization(format!(
                "render pipeline creation failed: {error}"
            )));
        }

        log::debug!("atom pipeline ready ({format:?}, {sample_count}x MSAA)");
        Ok(Self {
            pipeline,
            frame_layout,
            instance_layout,
            sample_count,
        })
    }

    /// MSAA sample count the pipeline was built for.
    #[must_use]
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_slots_match_shader_locations() {
        let layouts = vertex_layouts();
        let slots: Vec<_> = layouts
            .iter()
            .map(|layout| {
                assert_eq!(layout.attributes.len(), 1);
                assert_eq!(layout.attributes[0].offset, 0);
                assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
                (
                    layout.attributes[0].shader_location,
                    layout.attributes[0].format,
                    layout.array_stride,
                )
            })
            .collect();
        assert_eq!(
            slots,
            vec![
                (0, wgpu::VertexFormat::Float32x3, 12),
                (1, wgpu::VertexFormat::Float32x2, 8),
                (2, wgpu::VertexFormat::Float32x3, 12),
            ]
        );
    }

    #[test]
    fn depth_and_raster_state() {
        let depth = pipeline_util::depth_stencil_state();
        assert_eq!(depth.format, wgpu::TextureFormat::Depth32Float);
        assert_eq!(depth.depth_compare, wgpu::CompareFunction::Less);
        assert!(depth.depth_write_enabled);

        let primitive = pipeline_util::culled_triangle_list();
        assert_eq!(primitive.front_face, wgpu::FrontFace::Ccw);
        assert_eq!(primitive.cull_mode, Some(wgpu::Face::Back));
    }
}
