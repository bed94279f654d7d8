//! Per-atom instance data derived once from parsed atoms.

pub mod instances;
pub mod palette;

pub use instances::{InstanceRecord, InstanceSnapshot, DEFAULT_ATOM_RADIUS};
pub use palette::{ElementPalette, UNKNOWN_ELEMENT_COLOR};
