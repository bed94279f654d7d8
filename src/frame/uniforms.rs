//! Per-frame uniform data and the ring buffer that holds one copy per
//! frame slot.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::error::MolviewError;

/// Uniforms bound at group 0 for one frame.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Column-major projection matrix.
    pub projection: [[f32; 4]; 4],
    /// Column-major world-to-camera matrix.
    pub view: [[f32; 4]; 4],
}

impl FrameUniforms {
    /// Pack the two matrices.
    #[must_use]
    pub fn new(projection: Mat4, view: Mat4) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
        }
    }
}

/// Round `size` up to a multiple of `alignment` (a power of two).
#[must_use]
pub fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// One uniform buffer split into `slots` aligned [`FrameUniforms`] regions,
/// addressed through a single dynamic-offset bind group.
pub struct UniformRing {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u64,
    slots: usize,
}

impl UniformRing {
    /// Allocate the ring for `slots` frames.
    ///
    /// # Errors
    ///
    /// [`MolviewError::ResourceExhaustion`] if the buffer cannot be
    /// allocated.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        slots: usize,
    ) -> Result<Self, MolviewError> {
        let alignment =
            u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let stride =
            aligned_stride(size_of::<FrameUniforms>() as u64, alignment);
        let size = stride * slots.max(1) as u64;

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Ring"),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(MolviewError::ResourceExhaustion(format!(
                "uniform ring of {size} bytes: {error}"
            )));
        }

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Uniforms Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(size_of::<FrameUniforms>() as u64),
                }),
            }],
        });

        Ok(Self {
            buffer,
            bind_group,
            stride,
            slots: slots.max(1),
        })
    }

    /// Write the uniforms for `slot`.
    pub fn write(
        &self,
        queue: &wgpu::Queue,
        slot: usize,
        uniforms: &FrameUniforms,
    ) {
        queue.write_buffer(
            &self.buffer,
            self.offset(slot),
            bytemuck::bytes_of(uniforms),
        );
    }

    /// Dynamic offset selecting `slot` when binding group 0.
    #[must_use]
    pub fn dynamic_offset(&self, slot: usize) -> u32 {
        // Uniform buffers are far below 4 GiB.
        self.offset(slot) as u32
    }

    /// The dynamic-offset bind group.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    fn offset(&self, slot: usize) -> u64 {
        (slot % self.slots) as u64 * self.stride
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_is_two_matrices() {
        assert_eq!(size_of::<FrameUniforms>(), 128);
        let view = Mat4::from_scale(glam::Vec3::splat(2.0));
        let uniforms = FrameUniforms::new(Mat4::IDENTITY, view);
        let floats: &[f32] =
            bytemuck::cast_slice(bytemuck::bytes_of(&uniforms));
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[16], 2.0);
    }

    #[test]
    fn stride_rounds_up_to_alignment() {
        assert_eq!(aligned_stride(128, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(257, 256), 512);
        assert_eq!(aligned_stride(128, 64), 128);
        assert_eq!(aligned_stride(80, 0), 80);
    }

    #[test]
    fn default_limits_give_distinct_aligned_offsets() {
        let limits = wgpu::Limits::default();
        let alignment = u64::from(limits.min_uniform_buffer_offset_alignment);
        let stride =
            aligned_stride(size_of::<FrameUniforms>() as u64, alignment);
        let offsets: Vec<u64> = (0..3).map(|slot| slot * stride).collect();
        for offset in &offsets {
            assert_eq!(offset % alignment, 0);
        }
        assert!(offsets.windows(2).all(|w| w[1] - w[0] >= 128));
    }
}
