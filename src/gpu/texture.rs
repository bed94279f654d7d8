//! Size-dependent attachments: the depth buffer and the multisampled color
//! target.

use crate::renderer::pipeline_util::DEPTH_FORMAT;

/// Depth buffer plus, when multisampling, the MSAA color target that
/// resolves into the swapchain texture.
pub struct RenderTargets {
    /// Depth attachment view.
    pub depth: wgpu::TextureView,
    /// Multisampled color view (`None` at one sample).
    pub msaa: Option<wgpu::TextureView>,
    sample_count: u32,
}

impl RenderTargets {
    /// Create attachments for a `width` x `height` surface of `format`.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        (width, height): (u32, u32),
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        let attachment = |label: &str, format: wgpu::TextureFormat| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some(label),
                    size,
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        };

        let depth = attachment("Depth Target", DEPTH_FORMAT);
        let msaa = (sample_count > 1)
            .then(|| attachment("MSAA Color Target", format));
        Self {
            depth,
            msaa,
            sample_count,
        }
    }

    /// Sample count of both attachments.
    #[must_use]
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Color attachment for a pass that ends up in `surface_view`:
    /// render into the MSAA target and resolve, or straight to the surface.
    #[must_use]
    pub fn color_attachment<'a>(
        &'a self,
        surface_view: &'a wgpu::TextureView,
        clear: wgpu::Color,
    ) -> wgpu::RenderPassColorAttachment<'a> {
        let (view, resolve_target) = match &self.msaa {
            Some(msaa) => (msaa, Some(surface_view)),
            None => (surface_view, None),
        };
        wgpu::RenderPassColorAttachment {
            view,
            depth_slice: None,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        }
    }
}
