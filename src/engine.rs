//! The atom render engine: owns every GPU resource and draws one frame per
//! call to [`AtomRenderEngine::render`].

use glam::Mat4;

use crate::error::MolviewError;
use crate::frame::FrameScheduler;
use crate::gpu::instance_buffer::InstanceBuffer;
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::renderer::{unit_sphere, AtomPipeline, ShaderStages, SphereGeometry};
use crate::scene::InstanceSnapshot;

/// GPU context, atom pipeline, sphere mesh, instance storage and frame
/// scheduler for one window.
///
/// Everything is built once in [`new`](Self::new); afterwards only the view
/// matrix and the surface size change.
pub struct AtomRenderEngine {
    context: RenderContext,
    pipeline: AtomPipeline,
    geometry: SphereGeometry,
    instances: InstanceBuffer,
    scheduler: FrameScheduler,
}

impl AtomRenderEngine {
    /// Initialize the GPU and upload `snapshot`.
    ///
    /// # Errors
    ///
    /// - [`MolviewError::Gpu`] if no surface, adapter or device is available.
    /// - [`MolviewError::Initialization`] if the shader, mesh or pipeline
    ///   cannot be built.
    /// - [`MolviewError::ResourceExhaustion`] if instance or uniform storage
    ///   cannot be allocated.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        snapshot: &InstanceSnapshot,
        options: &Options,
    ) -> Result<Self, MolviewError> {
        let context = RenderContext::new(window, size).await?;

        let sample_count =
            context.supported_sample_count(options.display.msaa_samples);
        let stages = ShaderStages::atom_sphere()?;
        let pipeline = AtomPipeline::new(
            &context.device,
            context.format(),
            sample_count,
            &stages,
        )?;

        let mesh = unit_sphere(
            options.display.radial_segments,
            options.display.vertical_segments,
        )?;
        let geometry = SphereGeometry::upload(&context.device, &mesh);
        let instances = InstanceBuffer::upload(
            &context.device,
            &pipeline.instance_layout,
            snapshot,
        )?;
        let scheduler = FrameScheduler::new(
            &context,
            &pipeline,
            options.camera.projection(),
            options.display.clear_color,
        )?;

        log::info!(
            "engine ready: {} atoms, {}x{} surface, {sample_count}x MSAA",
            snapshot.len(),
            context.config.width,
            context.config.height
        );
        Ok(Self {
            context,
            pipeline,
            geometry,
            instances,
            scheduler,
        })
    }

    /// Draw and present one frame from `view`.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self, view: Mat4) -> Result<(), wgpu::SurfaceError> {
        self.scheduler.render_frame(
            &self.context,
            &self.pipeline,
            &self.geometry,
            &self.instances,
            view,
        )
    }

    /// Resize the surface, attachments and projection. Ignores zero-sized
    /// dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.scheduler.resize(&self.context, width, height);
        }
    }

    /// Reconfigure the surface after it was lost or became outdated.
    pub fn recover_surface(&mut self) {
        let (width, height) = self.context.size();
        log::warn!(
            "surface lost or outdated, reconfiguring at {width}x{height}"
        );
        self.context.reconfigure();
    }

    /// Stop accepting frames and wait for the GPU to finish the ones in
    /// flight.
    pub fn shutdown(&self) {
        log::debug!(
            "draining {} frames in flight",
            self.scheduler.in_flight()
        );
        self.scheduler.drain(&self.context.device);
        log::info!(
            "renderer shut down after {} frames",
            self.scheduler.frames_submitted()
        );
    }
}
