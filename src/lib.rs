// -- Lint policy ---------------------------------------------------------
// Clippy policy lives in Cargo.toml; these mirror it for the library root.

// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Documentation
#![warn(missing_docs)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]

//! Minimal GPU molecular structure viewer built on wgpu.
//!
//! Every `ATOM` record of a PDB file becomes one instance of a shared unit
//! sphere, scaled, translated and colored by element, and drawn in a single
//! instanced pass. A fly camera steered by mouse drag and WASD keys is
//! integrated on a fixed 60 Hz tick.
//!
//! # Key entry points
//!
//! - [`structure::parse`] / [`structure::parse_path`] - PDB `ATOM` records
//!   to [`structure::Atom`]s
//! - [`scene::InstanceSnapshot`] - the immutable per-atom instance records
//! - [`camera::FlyCamera`] - the fixed-tick camera integrator
//! - [`engine::AtomRenderEngine`] - GPU resources and per-frame drawing
//! - [`options::Options`] - runtime configuration loaded from TOML
//!
//! # Architecture
//!
//! The instance snapshot is built once and uploaded to a read-only storage
//! buffer. The camera publishes its view matrix through a lock-free triple
//! buffer; the render path reads the newest one each frame. The
//! [`frame::FrameScheduler`] keeps at most [`frame::FRAMES_IN_FLIGHT`]
//! frames between slot acquisition and GPU completion, each writing its own
//! region of a dynamic-offset uniform ring.

pub mod camera;
pub mod engine;
pub mod error;
pub mod frame;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod structure;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::{CameraInput, FlyCamera};
pub use engine::AtomRenderEngine;
pub use error::MolviewError;
pub use input::{InputEvent, InputState, MouseButton, MoveAction};
pub use options::Options;
pub use scene::{ElementPalette, InstanceSnapshot};
pub use structure::{parse, Atom, ParseError};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
