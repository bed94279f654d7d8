use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scene::palette::{DEFAULT_ELEMENT_COLORS, UNKNOWN_ELEMENT_COLOR};
use crate::scene::ElementPalette;

/// Per-element atom colors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// RGBA keyed by element symbol (`"O"`, `"Cl"`, ...).
    pub elements: HashMap<String, [f32; 4]>,
    /// RGBA for symbols missing from `elements`.
    pub unknown: [f32; 4],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            elements: DEFAULT_ELEMENT_COLORS
                .iter()
                .map(|(symbol, rgba)| ((*symbol).to_owned(), *rgba))
                .collect(),
            unknown: UNKNOWN_ELEMENT_COLOR,
        }
    }
}

impl ColorOptions {
    /// Palette used to color instances.
    #[must_use]
    pub fn palette(&self) -> ElementPalette {
        ElementPalette::new(
            self.elements
                .iter()
                .map(|(symbol, rgba)| (symbol.clone(), *rgba)),
            self.unknown,
        )
    }
}
