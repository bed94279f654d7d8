use std::collections::VecDeque;

use glam::Mat4;

use super::pool::FramePool;
use super::uniforms::{FrameUniforms, UniformRing};
use super::FRAMES_IN_FLIGHT;
use crate::camera::Projection;
use crate::error::MolviewError;
use crate::gpu::instance_buffer::InstanceBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::RenderTargets;
use crate::renderer::{AtomPipeline, SphereGeometry};

/// Records, submits and presents frames, keeping at most
/// [`FRAMES_IN_FLIGHT`] of them between acquisition and GPU completion.
///
/// Each frame leases a slot from the [`FramePool`], writes that slot's
/// region of the [`UniformRing`], and hands the lease to the queue's
/// completion callback so the slot frees itself when the GPU is done.
/// When every slot is busy it waits only for the oldest submission.
pub struct FrameScheduler {
    pool: FramePool,
    submissions: Submissions<wgpu::SubmissionIndex>,
    ring: UniformRing,
    targets: RenderTargets,
    projection: Projection,
    clear_color: wgpu::Color,
    frames_submitted: u64,
}

impl FrameScheduler {
    /// Allocate the uniform ring and attachments for the current surface.
    ///
    /// # Errors
    ///
    /// [`MolviewError::ResourceExhaustion`] if the uniform ring cannot be
    /// allocated.
    pub fn new(
        context: &RenderContext,
        pipeline: &AtomPipeline,
        mut projection: Projection,
        clear_color: [f32; 4],
    ) -> Result<Self, MolviewError> {
        let ring = UniformRing::new(
            &context.device,
            &pipeline.frame_layout,
            FRAMES_IN_FLIGHT,
        )?;
        let targets = RenderTargets::new(
            &context.device,
            context.size(),
            context.format(),
            pipeline.sample_count(),
        );
        let (width, height) = context.size();
        projection.resize(width, height);

        Ok(Self {
            pool: FramePool::new(FRAMES_IN_FLIGHT),
            submissions: Submissions::new(FRAMES_IN_FLIGHT),
            ring,
            targets,
            projection,
            clear_color: to_wgpu_color(clear_color),
            frames_submitted: 0,
        })
    }

    /// Follow a surface resize: recompute the projection aspect and rebuild
    /// the attachments. Zero sizes are ignored.
    pub fn resize(&mut self, context: &RenderContext, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.projection.resize(width, height);
        self.targets = RenderTargets::new(
            &context.device,
            (width, height),
            context.format(),
            self.targets.sample_count(),
        );
    }

    /// Frames acquired but not yet completed by the GPU.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pool.in_flight()
    }

    /// Total frames submitted.
    #[must_use]
    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    /// Render one frame with `view` and present it.
    ///
    /// While all frame slots are in flight, blocks until the oldest
    /// submission completes and frees its slot.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired; the frame slot is released before returning.
    pub fn render_frame(
        &mut self,
        context: &RenderContext,
        pipeline: &AtomPipeline,
        geometry: &SphereGeometry,
        instances: &InstanceBuffer,
        view: Mat4,
    ) -> Result<(), wgpu::SurfaceError> {
        let device = &context.device;
        let mut oldest = self.submissions.oldest().cloned();
        let slot = self.pool.acquire_with(|| {
            let poll = oldest
                .take()
                .map_or(wgpu::PollType::Wait, |index| {
                    wgpu::PollType::WaitForSubmissionIndex(index)
                });
            if let Err(e) = device.poll(poll) {
                log::warn!("device poll failed while waiting for a slot: {e}");
            }
        });

        let frame = match context.get_next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!(
                    "surface acquisition failed for slot {}: {e}",
                    slot.index()
                );
                slot.release();
                return Err(e);
            }
        };
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.ring.write(
            &context.queue,
            slot.index(),
            &FrameUniforms::new(self.projection.matrix(), view),
        );

        let mut encoder = context.create_encoder();
        {
            let color = self
                .targets
                .color_attachment(&surface_view, self.clear_color);
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Atom Pass"),
                color_attachments: &[Some(color)],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.targets.depth,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });

            rp.push_debug_group("Draw Atoms");
            rp.set_pipeline(&pipeline.pipeline);
            rp.set_bind_group(
                0,
                self.ring.bind_group(),
                &[self.ring.dynamic_offset(slot.index())],
            );
            rp.set_bind_group(1, instances.bind_group(), &[]);
            geometry.draw(&mut rp, instances.count());
            rp.pop_debug_group();
        }

        self.submissions.record(context.submit(encoder));
        context.queue.on_submitted_work_done(move || slot.release());
        frame.present();
        self.frames_submitted += 1;
        Ok(())
    }

    /// Block until every submitted frame has completed on the GPU.
    pub fn drain(&self, device: &wgpu::Device) {
        while self.pool.in_flight() > 0 {
            if let Err(e) = device.poll(wgpu::PollType::Wait) {
                log::warn!("device poll failed while draining frames: {e}");
                break;
            }
        }
    }
}

/// Submission handles of the most recent frames, oldest first.
///
/// Holds at most one entry per frame slot. Slots are handed out in release
/// order and queue work completes in submission order, so when every slot
/// is busy the front entry is the submission whose completion frees the
/// next slot.
#[derive(Debug)]
struct Submissions<T> {
    recent: VecDeque<T>,
    capacity: usize,
}

impl<T> Submissions<T> {
    fn new(capacity: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn record(&mut self, submission: T) {
        if self.recent.len() == self.capacity {
            let _ = self.recent.pop_front();
        }
        self.recent.push_back(submission);
    }

    fn oldest(&self) -> Option<&T> {
        self.recent.front()
    }
}

fn to_wgpu_color([r, g, b, a]: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: f64::from(a),
    }
}
