//! Viewer options with TOML file support.
//!
//! Camera, display, color, parser and keybinding settings are consolidated
//! here. Every section uses `#[serde(default)]`, so a file that only
//! overrides `[display]` leaves the rest at their defaults.

mod camera;
mod colors;
mod display;
mod keybindings;
mod parser;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use parser::ParserOptions;
use serde::{Deserialize, Serialize};

use crate::error::MolviewError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Projection and fly-control parameters.
    pub camera: CameraOptions,
    /// Sphere mesh and framebuffer settings.
    pub display: DisplayOptions,
    /// Element color palette.
    pub colors: ColorOptions,
    /// Structure-file parsing policy.
    pub parser: ParserOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`MolviewError::Io`] if the file cannot be read,
    /// [`MolviewError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, MolviewError> {
        let content =
            std::fs::read_to_string(path).map_err(MolviewError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MolviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// [`MolviewError::Io`] if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), MolviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolviewError::Io)?;
        }
        std::fs::write(path, content).map_err(MolviewError::Io)
    }
}
