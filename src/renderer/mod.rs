//! Atom sphere rendering: mesh tessellation, shader validation and the
//! instanced draw pipeline.

pub mod mesh;
pub mod pipeline;
pub(crate) mod pipeline_util;
pub mod shader;
pub mod sphere;

pub use mesh::{ellipsoid, unit_sphere, MeshData, MeshError, Submesh};
pub use pipeline::{vertex_layouts, AtomPipeline};
pub use shader::ShaderStages;
pub use sphere::SphereGeometry;
