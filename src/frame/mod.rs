//! Frame scheduling: the slot pool bounding frames in flight, the per-slot
//! uniform ring, and the scheduler that records and presents each frame.

pub mod pool;
pub mod scheduler;
pub mod uniforms;

pub use pool::{FramePool, FrameSlot};
pub use scheduler::FrameScheduler;
pub use uniforms::{FrameUniforms, UniformRing};

/// Maximum frames between slot acquisition and GPU completion.
pub const FRAMES_IN_FLIGHT: usize = 3;
