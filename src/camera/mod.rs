//! Camera system for the atom viewer.
//!
//! A free-fly camera integrated at a fixed 60 Hz tick from sampled input,
//! a perspective projection recomputed on resize, and a lock-free hand-off
//! that publishes each new view matrix to the render path.

/// Free-fly camera state and per-tick integration.
pub mod fly;
/// Single-writer/single-reader view matrix hand-off.
pub mod handoff;
/// Perspective projection parameters.
pub mod projection;
/// Fixed-timestep accumulator driving the camera tick.
pub mod timestep;

pub use fly::{CameraInput, FlyCamera, FlySettings, MoveFlags};
pub use handoff::{view_channel, ViewPublisher, ViewReader};
pub use projection::Projection;
pub use timestep::{FixedTimestep, TICK_DT, TICK_RATE_HZ};
