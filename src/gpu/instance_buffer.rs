use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

use crate::error::MolviewError;
use crate::scene::{InstanceRecord, InstanceSnapshot};

/// Read-only storage buffer holding one [`InstanceRecord`] per atom, plus
/// the bind group exposing it to the vertex stage.
///
/// Created once from an [`InstanceSnapshot`] and never written again.
pub struct InstanceBuffer {
    bind_group: wgpu::BindGroup,
    count: u32,
}

impl InstanceBuffer {
    /// Upload `snapshot`.
    ///
    /// An empty snapshot still gets a one-record buffer (storage bindings
    /// cannot be zero-sized) but reports an instance count of zero.
    ///
    /// # Errors
    ///
    /// [`MolviewError::ResourceExhaustion`] if the records exceed the
    /// device's buffer limits or the allocation runs out of memory.
    pub fn upload(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        snapshot: &InstanceSnapshot,
    ) -> Result<Self, MolviewError> {
        let count = check_capacity(snapshot.len(), &device.limits())?;

        let placeholder = [InstanceRecord::zeroed()];
        let contents = if snapshot.is_empty() {
            bytemuck::cast_slice(&placeholder)
        } else {
            snapshot.as_bytes()
        };

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Atom Instance Buffer"),
                contents,
                usage: wgpu::BufferUsages::STORAGE,
            });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            log::error!("instance buffer allocation failed: {error}");
            return Err(MolviewError::ResourceExhaustion(format!(
                "instance buffer of {} bytes: {error}",
                contents.len()
            )));
        }

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Atom Instance Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        log::info!(
            "uploaded {count} atom instances ({} bytes)",
            contents.len()
        );
        Ok(Self {
            bind_group,
            count,
        })
    }

    /// Number of instances to draw.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Bind group 1 of the atom pipeline.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Instance count as `u32`, or an error when `len` records would not fit
/// in a single storage binding under `limits`.
fn check_capacity(
    len: usize,
    limits: &wgpu::Limits,
) -> Result<u32, MolviewError> {
    let record = size_of::<InstanceRecord>() as u64;
    let bytes = (len.max(1) as u64).saturating_mul(record);
    let max = u64::from(limits.max_storage_buffer_binding_size)
        .min(limits.max_buffer_size);
    if bytes > max {
        return Err(MolviewError::ResourceExhaustion(format!(
            "{len} atom instances need {bytes} bytes, device allows {max}"
        )));
    }
    u32::try_from(len).map_err(|_| {
        MolviewError::ResourceExhaustion(format!(
            "{len} atom instances exceed the draw instance range"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_default_limits() {
        let limits = wgpu::Limits::default();
        assert_eq!(check_capacity(0, &limits).unwrap(), 0);
        assert_eq!(check_capacity(100_000, &limits).unwrap(), 100_000);
    }

    #[test]
    fn over_binding_limit_is_resource_exhaustion() {
        let limits = wgpu::Limits {
            max_storage_buffer_binding_size: 80 * 10,
            ..wgpu::Limits::default()
        };
        assert_eq!(check_capacity(10, &limits).unwrap(), 10);
        assert!(matches!(
            check_capacity(11, &limits),
            Err(MolviewError::ResourceExhaustion(_))
        ));
    }

    #[test]
    fn buffer_size_limit_also_applies() {
        let limits = wgpu::Limits {
            max_buffer_size: 80 * 4,
            ..wgpu::Limits::default()
        };
        assert!(matches!(
            check_capacity(5, &limits),
            Err(MolviewError::ResourceExhaustion(_))
        ));
    }
}
