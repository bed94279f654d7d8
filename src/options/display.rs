use serde::{Deserialize, Serialize};

use crate::scene::DEFAULT_ATOM_RADIUS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Sphere tessellation, sampling, and framebuffer options.
pub struct DisplayOptions {
    /// Uniform scale applied to every atom sphere.
    pub atom_radius: f32,
    /// Longitude slices of the sphere mesh.
    pub radial_segments: u32,
    /// Latitude stacks of the sphere mesh.
    pub vertical_segments: u32,
    /// MSAA sample count (1 disables multisampling).
    pub msaa_samples: u32,
    /// Linear RGBA clear color.
    pub clear_color: [f32; 4],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            atom_radius: DEFAULT_ATOM_RADIUS,
            radial_segments: 10,
            vertical_segments: 10,
            msaa_samples: 4,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}
