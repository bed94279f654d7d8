//! GPU resource management: device/surface initialization, the atom
//! instance storage buffer, and size-dependent render attachments.

/// Read-only storage buffer of atom instance records.
pub mod instance_buffer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth and MSAA attachments.
pub mod texture;
