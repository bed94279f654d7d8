//! Element → RGBA lookup used when building instances.

/// Color for any element symbol missing from the palette: light gray, opaque.
pub const UNKNOWN_ELEMENT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// The built-in element table.
pub const DEFAULT_ELEMENT_COLORS: [(&str, [f32; 4]); 6] = [
    ("O", [1.0, 0.0, 0.0, 1.0]),
    ("Cl", [0.0, 1.0, 0.0, 1.0]),
    ("N", [0.0, 0.0, 1.0, 1.0]),
    ("C", [0.5, 0.5, 0.5, 0.5]),
    ("S", [1.0, 1.0, 0.0, 1.0]),
    ("P", [1.0, 0.5, 0.0, 1.0]),
];

/// Fixed element color table with an explicit fallback.
///
/// Symbols are matched ASCII case-insensitively, so an upper-case element
/// column (`CL`) finds the `Cl` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementPalette {
    entries: Vec<(String, [f32; 4])>,
    unknown: [f32; 4],
}

impl Default for ElementPalette {
    fn default() -> Self {
        Self::new(
            DEFAULT_ELEMENT_COLORS
                .iter()
                .map(|(symbol, rgba)| ((*symbol).to_owned(), *rgba)),
            UNKNOWN_ELEMENT_COLOR,
        )
    }
}

impl ElementPalette {
    /// Build a palette from `(symbol, rgba)` pairs. Later duplicates of a
    /// symbol override earlier ones.
    pub fn new(
        entries: impl IntoIterator<Item = (String, [f32; 4])>,
        unknown: [f32; 4],
    ) -> Self {
        let mut palette = Self {
            entries: Vec::new(),
            unknown,
        };
        for (symbol, rgba) in entries {
            let symbol = symbol.trim().to_owned();
            if let Some(slot) = palette
                .entries
                .iter_mut()
                .find(|(s, _)| s.eq_ignore_ascii_case(&symbol))
            {
                slot.1 = rgba;
            } else {
                palette.entries.push((symbol, rgba));
            }
        }
        palette
    }

    /// Color for `element`, or the unknown-element color.
    #[must_use]
    pub fn color(&self, element: &str) -> [f32; 4] {
        self.lookup(element).unwrap_or(self.unknown)
    }

    /// Color for `element` if the table has an entry for it.
    #[must_use]
    pub fn lookup(&self, element: &str) -> Option<[f32; 4]> {
        let element = element.trim();
        self.entries
            .iter()
            .find(|(symbol, _)| symbol.eq_ignore_ascii_case(element))
            .map(|(_, rgba)| *rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table() {
        let palette = ElementPalette::default();
        assert_eq!(palette.color("O"), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(palette.color("N"), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(palette.color("C"), [0.5, 0.5, 0.5, 0.5]);
        assert_eq!(palette.color("S"), [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(palette.color("P"), [1.0, 0.5, 0.0, 1.0]);
    }

    #[test]
    fn case_insensitive_symbols() {
        let palette = ElementPalette::default();
        assert_eq!(palette.color("CL"), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(palette.color("cl"), palette.color("Cl"));
    }

    #[test]
    fn unknown_elements_use_named_default() {
        let palette = ElementPalette::default();
        assert_eq!(palette.color("Fe"), UNKNOWN_ELEMENT_COLOR);
        assert_eq!(palette.lookup("Fe"), None);
        // Calcium is not carbon.
        assert_eq!(palette.color("CA"), UNKNOWN_ELEMENT_COLOR);
    }

    #[test]
    fn later_entries_override() {
        let palette = ElementPalette::new(
            [
                ("O".to_owned(), [1.0, 0.0, 0.0, 1.0]),
                ("o".to_owned(), [0.0, 0.0, 0.0, 1.0]),
            ],
            [1.0; 4],
        );
        assert_eq!(palette.color("O"), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(palette.color("X"), [1.0; 4]);
    }
}
