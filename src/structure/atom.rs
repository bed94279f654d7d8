use glam::Vec3;

/// One atom read from a coordinate file.
///
/// Immutable once produced by the parser. The position is always finite and
/// the element symbol is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    element: String,
    position: Vec3,
}

impl Atom {
    /// Create an atom. Callers outside the parser are expected to uphold the
    /// finite-position, non-empty-element invariant themselves.
    #[must_use]
    pub fn new(element: impl Into<String>, position: Vec3) -> Self {
        Self {
            element: element.into(),
            position,
        }
    }

    /// Element symbol token as it appeared in the file (e.g. `"O"`, `"CL"`).
    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Cartesian position in file units.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }
}
