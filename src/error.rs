//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::renderer::mesh::MeshError;
use crate::structure::ParseError;

/// Errors produced by the molview crate.
///
/// Everything except [`Parse`](Self::Parse) and [`Io`](Self::Io) is fatal:
/// the renderer is never constructed and nothing is drawn.
#[derive(Debug)]
pub enum MolviewError {
    /// Coordinate file could not be read or contained a malformed record.
    Parse(ParseError),
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Pipeline, shading stage, vertex layout or mesh setup failed.
    Initialization(String),
    /// A GPU buffer for instance or uniform storage could not be allocated.
    ResourceExhaustion(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for MolviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "structure parse error: {e}"),
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Initialization(msg) => {
                write!(f, "renderer initialization failed: {msg}")
            }
            Self::ResourceExhaustion(msg) => {
                write!(f, "GPU resource exhausted: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for MolviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for MolviewError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RenderContextError> for MolviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<MeshError> for MolviewError {
    fn from(e: MeshError) -> Self {
        Self::Initialization(e.to_string())
    }
}

impl From<std::io::Error> for MolviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
